use clap::Args;
use job_portal::config::GamificationConfig;
use job_portal::error::AppError;
use job_portal::portal::payload::{
    ApplicationRequest, ApplicationUpdate, NewJob, RegisterRequest, StudentQuery, StudentUpdate,
};
use job_portal::portal::{
    ApplicationStatus, AwardStatus, JobType, MemoryStore, PortalService, StudentId,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of applications the demo student submits.
    #[arg(long, default_value_t = 5)]
    pub(crate) applications: u32,
    /// Points the student holds before the first application.
    #[arg(long, default_value_t = 0)]
    pub(crate) starting_points: u64,
    /// Points granted per application.
    #[arg(long)]
    pub(crate) points: Option<i64>,
    /// Badge threshold override.
    #[arg(long)]
    pub(crate) threshold: Option<u64>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mut gamification = GamificationConfig::default();
    if let Some(points) = args.points {
        gamification.application_points = points;
    }
    if let Some(threshold) = args.threshold {
        gamification.badge_threshold = threshold;
    }
    gamification.validate()?;

    let service = PortalService::new(
        Arc::new(MemoryStore::default()),
        gamification.application_award(),
    );

    println!("Job portal demo");
    println!(
        "Award: {} points per application, \"{}\" at {} points",
        gamification.application_points, gamification.badge_name, gamification.badge_threshold
    );

    let company = service.register(account(
        "Northwind Labs",
        "talent@northwind.test",
        "company",
    ))?;
    let job = service.create_job(NewJob {
        title: Some("Junior Platform Engineer".to_string()),
        description: Some("Keep the deploy pipeline green".to_string()),
        company_name: Some(company.user.name.clone()),
        company_id: Some(company.user.id.clone()),
        category: Some("Engineering".to_string()),
        job_type: Some(JobType::FullTime),
        salary: Some("65k".to_string()),
        ..NewJob::default()
    })?;
    println!(
        "\nPosted \"{}\" for {} ({})",
        job.title, job.company_name, job.company_id
    );

    let student = service.register(account("Robin Vale", "robin@example.edu", "student"))?;
    let student_id = StudentId(student.user.id.clone());
    if args.starting_points > 0 {
        service.update_student(
            &student_id,
            StudentUpdate {
                points: Some(args.starting_points),
                ..StudentUpdate::default()
            },
        )?;
    }
    println!(
        "Registered {} ({}) with {} points",
        student.user.name, student_id, args.starting_points
    );

    println!("\nApplications");
    let mut last_application = None;
    for attempt in 1..=args.applications {
        let outcome = service.submit_application(ApplicationRequest {
            student_id: Some(student_id.0.clone()),
            job_id: Some(job.id.0.clone()),
        })?;
        let badges = if outcome.badges.is_empty() {
            "none".to_string()
        } else {
            outcome
                .badges
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "  #{attempt} {} -> {} points, badges: {}",
            outcome.application.id, outcome.points, badges
        );
        if let AwardStatus::Awarded {
            newly_awarded: Some(badge),
        } = &outcome.award
        {
            println!("     earned \"{badge}\"");
        }
        last_application = Some(outcome.application.id);
    }

    if let Some(id) = last_application {
        service.update_application(
            &id,
            ApplicationUpdate {
                status: Some(ApplicationStatus::Reviewed),
                ..ApplicationUpdate::default()
            },
        )?;
    }

    let history = service.applications_for_student(StudentQuery {
        student_id: Some(student_id.0.clone()),
    })?;
    println!("\nApplication history");
    for view in history.applications {
        let title = view
            .position
            .map(|position| position.title)
            .unwrap_or_else(|| "unknown posting".to_string());
        println!(
            "  {} {} [{}]",
            view.application.id,
            title,
            view.application.status.label()
        );
    }

    let standing = service.get_student(&student_id)?;
    println!(
        "\nFinal standing: {} points, {} badge(s)",
        standing.points,
        standing.badges.len()
    );
    Ok(())
}

fn account(name: &str, email: &str, kind: &str) -> RegisterRequest {
    RegisterRequest {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        password: Some("demo-password".to_string()),
        account_type: Some(kind.to_string()),
    }
}
