use super::common::*;
use crate::workflows::application::domain::{FieldName, ResumeFile};
use crate::workflows::application::presentation::{Page, PageView, PostingDetails};
use crate::workflows::application::submission::ApplicationForm;

fn render(form: &ApplicationForm, posting: &PostingDetails) -> String {
    Page {
        posting,
        view: PageView::of(form),
        action: "/apply/session-test",
    }
    .to_string()
}

fn fill(form: &mut ApplicationForm) {
    let state = complete_state();
    for field in FieldName::ALL {
        if let Some(value) = state.text(field) {
            form.set_field(field, value).expect("edit accepted");
        }
    }
}

#[test]
fn in_progress_view_lists_sections_in_order() {
    let form = ApplicationForm::new();
    let html = render(&form, &posting());

    let legends = [
        "<legend>Resume/CV (optional)</legend>",
        "<legend>Basic Information</legend>",
        "<legend>Links</legend>",
        "<legend>4 Day In Office Expectation ✱</legend>",
        "<legend>Work Authorization ✱</legend>",
        "<legend>Visa Sponsorship ✱</legend>",
        "<legend>Additional information</legend>",
        "<legend>U.S. Equal Employment Opportunity information (Voluntary)</legend>",
    ];
    let mut cursor = 0;
    for legend in legends {
        let offset = html[cursor..]
            .find(legend)
            .unwrap_or_else(|| panic!("{legend} missing or out of order"));
        cursor += offset + legend.len();
    }

    assert!(html.contains("<h1>Platform Engineer</h1>"));
    assert!(html.contains("Denver, CO · Infrastructure &amp; Tooling · On-site"));
    assert!(html.contains("working out of our Denver, CO office"));
    assert!(html.contains("action=\"/apply/session-test\""));
    assert!(html.contains("<button type=\"submit\" class=\"primary\">Submit application</button>"));
    assert!(html.contains("<span>Northwind careers</span>"));
}

#[test]
fn required_inputs_are_marked() {
    let html = render(&ApplicationForm::new(), &posting());

    assert!(html.contains("<label for=\"fullName\">Full name ✱</label>"));
    assert!(html.contains("<label for=\"email\">Email ✱</label>"));
    assert!(html.contains("<label for=\"phone\">Phone ✱</label>"));
    assert!(html.contains("<label for=\"currentLocation\">Current location</label>"));
    assert!(html.contains("<label for=\"linkedin\">LinkedIn URL</label>"));
    assert!(html.contains("<label for=\"gender\">Gender</label>"));
}

#[test]
fn controls_use_expected_types_and_options() {
    let html = render(&ApplicationForm::new(), &posting());

    assert!(html.contains("type=\"file\" accept=\".pdf,.doc,.docx,.txt,.rtf\""));
    assert!(html.contains("id=\"email\" name=\"email\" type=\"email\""));
    assert!(html.contains("id=\"phone\" name=\"phone\" type=\"tel\""));
    assert!(html.contains(
        "type=\"url\" value=\"\" placeholder=\"https://www.linkedin.com/in/username\""
    ));
    assert!(html.contains("<input type=\"radio\" name=\"workAuthUs\" value=\"Yes\">Yes</label>"));
    assert!(html.contains("<option value=\"\">Select ...</option>"));
    assert!(html.contains(
        "<option value=\"I identify as one or more of the classifications of a protected veteran\">I identify as a protected veteran</option>"
    ));
    assert!(html.contains("<option value=\"I don&#39;t wish to answer\">I don&#39;t wish to answer</option>"));
    assert!(html.contains("placeholder=\"Add a cover letter or anything else you want to share.\""));
}

#[test]
fn errors_render_next_to_their_fields() {
    let mut form = ApplicationForm::new();
    form.set_field(FieldName::Email, "a@b").expect("edit accepted");
    form.submit();
    let html = render(&form, &posting());

    let email_input = html.find("id=\"email\"").expect("email input");
    let email_error = html
        .find("<div class=\"error\" id=\"email-error\">Enter a valid email.</div>")
        .expect("email error");
    let phone_input = html.find("id=\"phone\"").expect("phone input");
    assert!(email_input < email_error && email_error < phone_input);

    assert!(html.contains("id=\"fullName-error\">Full name is required.</div>"));
    assert!(html.contains("id=\"needsSponsorship-error\">Please select Yes or No.</div>"));
    assert!(!html.contains("id=\"linkedin-error\""));
    assert!(html.contains("value=\"a@b\""), "values survive a rejected submit");
}

#[test]
fn current_values_are_escaped_and_selected() {
    let mut form = ApplicationForm::new();
    form.set_field(FieldName::FullName, "Jane \"JD\" <Doe>")
        .expect("edit accepted");
    form.set_field(FieldName::NeedsSponsorship, "No")
        .expect("edit accepted");
    form.set_field(FieldName::Race, "Asian").expect("edit accepted");
    form.set_field(FieldName::AdditionalInfo, "</textarea><b>hi</b>")
        .expect("edit accepted");
    form.set_field(
        FieldName::Resume,
        ResumeFile {
            name: "cv.pdf".to_string(),
            size_bytes: 2048,
            content_type: None,
        },
    )
    .expect("edit accepted");

    let html = render(&form, &posting());

    assert!(html.contains("value=\"Jane &quot;JD&quot; &lt;Doe&gt;\""));
    assert!(html.contains("name=\"needsSponsorship\" value=\"No\" checked>No</label>"));
    assert!(html.contains("name=\"needsSponsorship\" value=\"Yes\">Yes</label>"));
    assert!(html.contains("<option value=\"Asian\" selected>Asian</option>"));
    assert!(html.contains("&lt;/textarea&gt;&lt;b&gt;hi&lt;/b&gt;</textarea>"));
    assert!(html.contains("Selected: cv.pdf (2.0 KB)"));
}

#[test]
fn textarea_keeps_a_leading_newline() {
    let mut form = ApplicationForm::new();
    form.set_field(FieldName::AdditionalInfo, "\nReferences on request")
        .expect("edit accepted");

    let html = render(&form, &posting());

    assert!(html.contains(">\n\nReferences on request</textarea>"));

    let blank = render(&ApplicationForm::new(), &posting());
    assert!(blank.contains(">\n</textarea>"));
}

#[test]
fn submitted_view_replaces_the_form() {
    let mut form = ApplicationForm::new();
    fill(&mut form);
    form.submit();

    assert_eq!(PageView::of(&form), PageView::Submitted);
    let html = render(&form, &posting());
    assert!(html.contains("<h1>Congratulations</h1>"));
    assert!(html.contains("<p>Your application has been submitted successfully.</p>"));
    assert!(!html.contains("<form"));
    assert!(!html.contains("Submit application"));
}

#[test]
fn form_view_exposes_every_field_once() {
    let form = ApplicationForm::new();
    let PageView::Form(sections) = PageView::of(&form) else {
        panic!("blank form renders the form view");
    };

    let fields: Vec<FieldName> = sections
        .iter()
        .flat_map(|section| section.fields.iter().map(|field| field.field()))
        .collect();
    assert_eq!(fields, FieldName::ALL.to_vec());
    assert!(sections
        .iter()
        .flat_map(|section| &section.fields)
        .all(|field| field.error.is_none()));
}
