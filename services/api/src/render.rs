use crate::cli::{ClassifyArgs, ImpactArgs, ReportArgs, RosterArgs};
use chrono::Local;
use roster_desk::config::AppConfig;
use roster_desk::error::AppError;
use roster_desk::roster::report::views::{BudgetView, LeaderboardEntry};
use roster_desk::roster::{
    aggregate, build_report, classify_tier, recommend_amount, Athlete, Evaluation, Gender,
    ImpactScore, ImpactScorer, PotentialTier, Rating, RosterImporter, RosterReport, ScholarshipBudget,
    ScoringConfig,
};
use std::fmt::Write;

fn scoring_config() -> Result<ScoringConfig, AppError> {
    let config = AppConfig::load()?;
    Ok(config.scholarships.scoring_config()?)
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let config = scoring_config()?;
    let tier = classify_tier(args.event, &args.result, args.gender, &config.thresholds);
    println!(
        "{} {} ({}): {}",
        args.gender.label(),
        args.event.label(),
        args.result,
        tier.label()
    );
    Ok(())
}

pub(crate) fn run_impact(args: ImpactArgs) -> Result<(), AppError> {
    let config = scoring_config()?;
    let max_scholarship = args.max_scholarship.unwrap_or(config.max_scholarship);
    let evaluation = Evaluation {
        technical_skill: args.technical_skill.and_then(Rating::new),
        athletic_ability: args.athletic_ability.and_then(Rating::new),
        competitive_instinct: args.competitive_instinct.and_then(Rating::new),
        academic_potential: args.academic_potential.and_then(Rating::new),
        work_ethic: args.work_ethic.and_then(Rating::new),
        team_culture: args.team_culture.and_then(Rating::new),
        coachability: args.coachability.and_then(Rating::new),
        potential_tier: args.potential_tier.map(PotentialTier::from),
        notes: String::new(),
    };

    let score = ImpactScorer::new(config.impact).score(Some(&evaluation), args.tier);
    let recommended = recommend_amount(score.total, max_scholarship);
    print!("{}", render_impact(&score, recommended));
    Ok(())
}

pub(crate) fn run_budget(args: RosterArgs) -> Result<(), AppError> {
    let config = scoring_config()?;
    let athletes = RosterImporter::from_path(&args.roster, &config.thresholds)?;
    let budgets: Vec<ScholarshipBudget> = Gender::ordered()
        .into_iter()
        .map(|gender| aggregate(&athletes, gender, &config.budgets))
        .collect();
    print!("{}", render_budget_lines(&budgets));
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = scoring_config()?;
    let athletes: Vec<Athlete> = RosterImporter::from_path(&args.roster, &config.thresholds)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let scorer = ImpactScorer::new(config.impact.clone());
    let report = build_report(&athletes, &config, &scorer, today);

    if args.json {
        println!("{}", render_report_json(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

pub(crate) fn render_report_json(report: &RosterReport) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub(crate) fn render_impact(score: &ImpactScore, recommended: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Impact {} (display {}%) x{:.1}",
        score.total,
        score.display_percent(),
        score.multiplier
    );
    for component in &score.components {
        let _ = writeln!(
            out,
            "  - {:<12} {:>3}/{} {}",
            component.dimension.label(),
            component.points,
            component.dimension.max_points(),
            component.notes
        );
    }
    let _ = writeln!(out, "Recommended scholarship: ${recommended:.0}");
    out
}

pub(crate) fn render_budget_lines(budgets: &[ScholarshipBudget]) -> String {
    let mut out = String::new();
    for budget in budgets {
        let utilization = budget
            .utilization_percent()
            .map(|pct| format!("{pct:.1}%"))
            .unwrap_or_else(|_| "n/a".to_string());
        let flag = if budget.is_over_allocated() {
            " OVER BUDGET"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{}: ${:.0} allocated of ${:.0} | ${:.0} remaining | {} used{}",
            budget.gender.label(),
            budget.allocated,
            budget.total_budget,
            budget.remaining,
            utilization,
            flag
        );
    }
    out
}

pub(crate) fn render_report(report: &RosterReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Roster report for {}", report.generated_on);
    let _ = writeln!(
        out,
        "{} active athletes | {} archived",
        report.active_athletes, report.archived_athletes
    );

    let _ = writeln!(out, "\nTier distribution:");
    for gender in Gender::ordered() {
        let counts: Vec<String> = report
            .tier_distribution
            .iter()
            .filter(|entry| entry.gender == gender)
            .map(|entry| format!("{} {}", entry.tier_label, entry.count))
            .collect();
        let _ = writeln!(out, "  - {}: {}", gender.label(), counts.join(" | "));
    }

    let _ = writeln!(out, "\nScholarship pools:");
    for view in &report.budgets {
        render_budget_view(&mut out, view);
    }

    let _ = writeln!(out, "\nImpact leaderboard:");
    if report.leaderboard.is_empty() {
        let _ = writeln!(out, "  (no evaluations recorded)");
    }
    for (rank, entry) in report.leaderboard.iter().enumerate() {
        render_leaderboard_entry(&mut out, rank + 1, entry);
    }
    out
}

fn render_budget_view(out: &mut String, view: &BudgetView) {
    let utilization = view
        .utilization_pct
        .map(|pct| format!("{pct:.1}%"))
        .unwrap_or_else(|| "n/a".to_string());
    let _ = writeln!(
        out,
        "  - {}: ${:.0} of ${:.0} ({} used, ${:.0} remaining){}",
        view.gender_label,
        view.allocated,
        view.total_budget,
        utilization,
        view.remaining,
        if view.over_allocated { " OVER BUDGET" } else { "" }
    );
}

fn render_leaderboard_entry(out: &mut String, rank: usize, entry: &LeaderboardEntry) {
    let _ = writeln!(
        out,
        "  {rank}. {} ({}, {}) impact {} [{}] | recommended ${:.0} | current ${:.0}",
        entry.name,
        entry.event,
        entry.tier_label,
        entry.impact_total,
        entry.gender.code(),
        entry.recommended_amount,
        entry.current_amount
    );
}
