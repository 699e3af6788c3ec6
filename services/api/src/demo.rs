use crate::infra::InMemorySessionRepository;
use clap::{Args, ValueEnum};
use job_application::config::AppConfig;
use job_application::error::AppError;
use job_application::workflows::application::{
    ApplicationForm, ApplicationFormService, ApplicationServiceError, FieldName, FieldValue, Page,
    PageView, PostingDetails, SessionId, SubmissionStatus, ValidationErrors,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Emit the outcomes as JSON instead of a text summary.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Which page state to render.
    #[arg(long, value_enum, default_value_t = RenderView::Form)]
    pub(crate) view: RenderView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum RenderView {
    /// Blank form as first shown to an applicant
    Form,
    /// Form after an empty submit, with every required-field message
    Errors,
    /// Confirmation shown after an accepted submit
    Submitted,
    /// Page for an unknown session
    Missing,
}

#[derive(Debug, Serialize)]
pub(crate) struct DemoScenario {
    pub(crate) name: &'static str,
    pub(crate) session_id: SessionId,
    pub(crate) accepted: bool,
    pub(crate) status: SubmissionStatus,
    pub(crate) errors: ValidationErrors,
}

pub(crate) fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    println!("{}", render_page(&config.posting, args.view));
    Ok(())
}

pub(crate) fn render_page(posting: &PostingDetails, view: RenderView) -> String {
    let mut form = ApplicationForm::new();
    match view {
        RenderView::Form | RenderView::Missing => {}
        RenderView::Errors => {
            form.submit();
        }
        RenderView::Submitted => {
            for (field, value) in complete_application() {
                // edits on a fresh form cannot be rejected
                let _ = form.set_field(field, value);
            }
            form.submit();
        }
    }

    let page_view = match view {
        RenderView::Missing => PageView::Missing,
        _ => PageView::of(&form),
    };

    Page {
        posting,
        view: page_view,
        action: "/apply/preview",
    }
    .to_string()
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemorySessionRepository::default());
    let service = ApplicationFormService::new(repository.clone(), PostingDetails::default());

    let scenarios = match demo_scenarios(&service) {
        Ok(scenarios) => scenarios,
        Err(err) => {
            println!("Demo aborted: {}", err);
            return Ok(());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scenarios)?);
        return Ok(());
    }

    println!("Job application form demo ({})", service.posting().job_title);
    for scenario in &scenarios {
        println!(
            "- {} [{}] -> {} ({})",
            scenario.name,
            scenario.session_id,
            if scenario.accepted {
                "accepted"
            } else {
                "blocked"
            },
            scenario.status.label()
        );
        for (field, message) in scenario.errors.iter() {
            println!("    {}: {}", field.as_str(), message);
        }
    }
    println!("{} sessions opened", repository.len());

    Ok(())
}

pub(crate) fn demo_scenarios(
    service: &ApplicationFormService<InMemorySessionRepository>,
) -> Result<Vec<DemoScenario>, ApplicationServiceError> {
    let mut malformed = complete_application();
    if let Some(entry) = malformed
        .iter_mut()
        .find(|(field, _)| *field == FieldName::Email)
    {
        entry.1 = FieldValue::from("not-an-email");
    }

    let runs = [
        ("empty submission", Vec::new()),
        ("complete submission", complete_application()),
        ("malformed email", malformed),
    ];

    let mut scenarios = Vec::with_capacity(runs.len());
    for (name, edits) in runs {
        let record = service.start()?;
        let (outcome, record) = service.apply_and_submit(&record.session_id, edits)?;
        scenarios.push(DemoScenario {
            name,
            session_id: record.session_id,
            accepted: outcome.accepted,
            status: record.form.status(),
            errors: outcome.errors,
        });
    }
    Ok(scenarios)
}

fn complete_application() -> Vec<(FieldName, FieldValue)> {
    vec![
        (FieldName::FullName, "Jane Doe".into()),
        (FieldName::Email, "jane@example.com".into()),
        (FieldName::Phone, "555-1234".into()),
        (FieldName::FourDayOfficeExpectation, "Yes".into()),
        (FieldName::WorkAuthUs, "Yes".into()),
        (FieldName::NeedsSponsorship, "No".into()),
    ]
}
