use crate::infra::in_memory_board;
use chrono::Local;
use clap::Args;
use job_board::board::applications::StatusDecision;
use job_board::board::companies::CompanyDraft;
use job_board::board::identity::{LoginRequest, RegisterRequest, User};
use job_board::board::input::{Scalar, StringList};
use job_board::board::jobs::JobDraft;
use job_board::board::store::MemoryStore;
use job_board::board::BoardState;
use job_board::config::AuthConfig;
use job_board::error::AppError;

const DEMO_PASSWORD: &str = "demo-password";

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of students applying to the demo job.
    #[arg(long, default_value_t = 2)]
    pub(crate) students: u8,
    /// Decision recorded for the first applicant (Accept, Reject or Pending).
    #[arg(long, default_value = "Accept")]
    pub(crate) decision: StatusDecision,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { students, decision } = args;

    let auth = AuthConfig {
        jwt_secret: "job-board-demo".to_string(),
        token_ttl_hours: 1,
    };
    let board = in_memory_board(&auth);

    println!("Job board demo ({})", Local::now().date_naive());

    let Some(recruiter) = sign_up(&board, "Rita Recruiter", "recruiter") else {
        return Ok(());
    };
    match board.identity.login(LoginRequest {
        email: Some(recruiter.email.clone()),
        password: Some(DEMO_PASSWORD.to_string()),
        role: Some("recruiter".to_string()),
    }) {
        Ok((_, issued)) => println!("  Session token valid until {}", issued.expires_at),
        Err(err) => {
            println!("  Login rejected: {err}");
            return Ok(());
        }
    }

    let company = match board.companies.register(
        &recruiter,
        CompanyDraft {
            name: Some("Acme Robotics".to_string()),
            location: Some("Lisbon".to_string()),
            logo: Some("https://cdn.example.com/acme.png".to_string()),
            ..CompanyDraft::default()
        },
    ) {
        Ok(company) => company,
        Err(err) => {
            println!("  Company registration rejected: {err}");
            return Ok(());
        }
    };
    println!("- Registered company {} ({})", company.name, company.id);

    let job = match board.jobs.create(
        &recruiter,
        JobDraft {
            title: Some("Platform Engineer".to_string()),
            description: Some("Run the hiring platform".to_string()),
            requirements: Some(StringList::Delimited("Rust, Kubernetes".to_string())),
            experience: Some(Scalar::text("3+ years")),
            position: Some(Scalar::from(2)),
            job_type: Some("full-time".to_string()),
            location: Some("Lisbon".to_string()),
            company: Some(company.id.to_string()),
            salary: Some(Scalar::from(120_000)),
        },
    ) {
        Ok(job) => job,
        Err(err) => {
            println!("  Job posting rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Posted {} [{}] at {}",
        job.details.title, job.details.job_type, company.name
    );

    println!("\nApplications");
    let mut first_application = None;
    for index in 1..=students {
        let Some(student) = sign_up(&board, &format!("Student {index}"), "student") else {
            return Ok(());
        };
        match board.applications.submit(&student, &job.id) {
            Ok(submitted) => {
                println!(
                    "  - {} applied -> status {} ({} applicant(s) total)",
                    student.fullname,
                    submitted.application.status.label(),
                    submitted.total_applicants
                );
                first_application.get_or_insert((student, submitted.application.id));
            }
            Err(err) => println!("  - {} could not apply: {err}", student.fullname),
        }
    }

    let Some((first_student, application_id)) = first_application else {
        println!("  No applications received");
        return Ok(());
    };
    if let Err(err) = board.applications.submit(&first_student, &job.id) {
        println!("  Repeat submission by {}: {err}", first_student.fullname);
    }

    println!("\nReview");
    match board.applications.applicants(&recruiter, &job.id) {
        Ok(entries) => {
            for entry in entries {
                println!(
                    "  - {} <{}> {}",
                    entry.applicant.fullname,
                    entry.applicant.email,
                    entry.status.label()
                );
            }
        }
        Err(err) => println!("  Applicants unavailable: {err}"),
    }

    match board
        .applications
        .update_status(&recruiter, &application_id, decision)
    {
        Ok(updated) => println!(
            "  Decision for {}: {}",
            first_student.fullname,
            updated.status.label()
        ),
        Err(err) => println!("  Decision rejected: {err}"),
    }

    match board.applications.applied_jobs(&first_student) {
        Ok(applied) => match serde_json::to_string_pretty(&applied) {
            Ok(json) => println!("\n{}'s applications:\n{json}", first_student.fullname),
            Err(err) => println!("  Application payload unavailable: {err}"),
        },
        Err(err) => println!("  Applications unavailable: {err}"),
    }

    Ok(())
}

fn sign_up(board: &BoardState<MemoryStore>, fullname: &str, role: &str) -> Option<User> {
    let email = format!("{}@demo.example", fullname.to_lowercase().replace(' ', "."));
    match board.identity.register(RegisterRequest {
        fullname: Some(fullname.to_string()),
        email: Some(email),
        password: Some(DEMO_PASSWORD.to_string()),
        phone_number: Some(Scalar::from(5_550_100)),
        role: Some(role.to_string()),
    }) {
        Ok(user) => {
            println!("- Signed up {} as {}", user.fullname, user.role);
            Some(user)
        }
        Err(err) => {
            println!("  Sign up rejected for {fullname}: {err}");
            None
        }
    }
}
