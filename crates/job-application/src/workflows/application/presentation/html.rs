use std::fmt::{self, Display, Formatter};

use super::layout::{Control, REQUIRED_MARKER};
use super::{FieldView, PageView, PostingDetails, SectionView};
use crate::workflows::application::domain::ResumeFile;

pub const CONFIRMATION_HEADING: &str = "Congratulations";
pub const CONFIRMATION_MESSAGE: &str = "Your application has been submitted successfully.";
pub const SUBMIT_LABEL: &str = "Submit application";
const SELECT_PLACEHOLDER: &str = "Select ...";

/// A complete HTML document for one page view.
pub struct Page<'a> {
    pub posting: &'a PostingDetails,
    pub view: PageView<'a>,
    /// Form `action` target; the session's own URL.
    pub action: &'a str,
}

impl Display for Page<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let posting = self.posting;
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html lang=\"en\">")?;
        writeln!(f, "<head>")?;
        writeln!(f, "<meta charset=\"utf-8\">")?;
        writeln!(
            f,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
        )?;
        writeln!(
            f,
            "<title>{} · {}</title>",
            Escaped(&posting.job_title),
            Escaped(&posting.brand_name)
        )?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<div class=\"app-container\">")?;

        match &self.view {
            PageView::Form(sections) => {
                self.write_header(f, true)?;
                self.write_form(f, sections)?;
            }
            PageView::Submitted => {
                self.write_header(f, false)?;
                writeln!(f, "<main class=\"content\">")?;
                writeln!(f, "<h1>{CONFIRMATION_HEADING}</h1>")?;
                writeln!(f, "<p>{CONFIRMATION_MESSAGE}</p>")?;
                writeln!(f, "</main>")?;
            }
            PageView::Missing => {
                self.write_header(f, false)?;
                writeln!(f, "<main class=\"content\">")?;
                writeln!(f, "<h1>Application not found</h1>")?;
                writeln!(
                    f,
                    "<p>This application session does not exist or has expired.</p>"
                )?;
                writeln!(f, "<p><a href=\"/apply\">Start a new application</a></p>")?;
                writeln!(f, "</main>")?;
            }
        }

        if matches!(self.view, PageView::Form(_)) {
            writeln!(
                f,
                "<footer class=\"footer\"><span>{}</span></footer>",
                Escaped(&posting.footer_note)
            )?;
        }

        writeln!(f, "</div>")?;
        writeln!(f, "</body>")?;
        write!(f, "</html>")
    }
}

impl Page<'_> {
    fn write_header(&self, f: &mut Formatter<'_>, with_job: bool) -> fmt::Result {
        let posting = self.posting;
        writeln!(f, "<header class=\"header\">")?;
        writeln!(
            f,
            "<span class=\"brand-logo\">{}</span>",
            Escaped(&posting.brand_name)
        )?;
        if with_job {
            writeln!(f, "<div class=\"job-meta\">")?;
            writeln!(f, "<h1>{}</h1>", Escaped(&posting.job_title))?;
            writeln!(
                f,
                "<div class=\"job-location\">{}</div>",
                Escaped(&posting.job_meta)
            )?;
            writeln!(f, "</div>")?;
        }
        writeln!(f, "</header>")
    }

    fn write_form(&self, f: &mut Formatter<'_>, sections: &[SectionView<'_>]) -> fmt::Result {
        writeln!(f, "<main class=\"content\">")?;
        writeln!(f, "<h2>Submit your application</h2>")?;
        writeln!(
            f,
            "<form class=\"application-form\" method=\"post\" action=\"{}\" \
             enctype=\"multipart/form-data\" novalidate>",
            Escaped(self.action)
        )?;

        for section in sections {
            self.write_section(f, section)?;
        }

        writeln!(f, "<div class=\"actions\">")?;
        writeln!(
            f,
            "<button type=\"submit\" class=\"primary\">{SUBMIT_LABEL}</button>"
        )?;
        writeln!(f, "</div>")?;
        writeln!(f, "</form>")?;
        writeln!(f, "</main>")
    }

    fn write_section(&self, f: &mut Formatter<'_>, section: &SectionView<'_>) -> fmt::Result {
        let spec = section.spec;
        writeln!(f, "<fieldset class=\"section\">")?;
        if spec.marks_legend() {
            writeln!(f, "<legend>{} {REQUIRED_MARKER}</legend>", spec.legend)?;
        } else {
            writeln!(f, "<legend>{}</legend>", spec.legend)?;
        }
        if let Some(hint) = spec.hint {
            writeln!(
                f,
                "<p class=\"hint\">{}</p>",
                Escaped(&self.posting.hint_text(hint))
            )?;
        }

        let grid = spec.columns.class();
        if let Some(class) = grid {
            writeln!(f, "<div class=\"{class}\">")?;
        }
        for field in &section.fields {
            write_field(f, field)?;
        }
        if grid.is_some() {
            writeln!(f, "</div>")?;
        }

        writeln!(f, "</fieldset>")
    }
}

fn write_field(f: &mut Formatter<'_>, field: &FieldView<'_>) -> fmt::Result {
    let name = field.field().as_str();
    let spec = field.spec;

    match spec.control {
        Control::File { accept } => {
            writeln!(
                f,
                "<input id=\"{name}\" name=\"{name}\" type=\"file\" accept=\"{accept}\" \
                 aria-label=\"{}\">",
                spec.label
            )?;
            if let Some(resume) = field.resume {
                write_resume_note(f, resume)?;
            }
        }
        Control::Radio => {
            writeln!(f, "<div class=\"choices\">")?;
            for option in field.field().options() {
                let checked = if field.value == option.value {
                    " checked"
                } else {
                    ""
                };
                writeln!(
                    f,
                    "<label><input type=\"radio\" name=\"{name}\" value=\"{}\"{checked}>{}</label>",
                    Escaped(option.value),
                    Escaped(option.label)
                )?;
            }
            writeln!(f, "</div>")?;
        }
        Control::Select => {
            writeln!(f, "<div class=\"field\">")?;
            write_label(f, field)?;
            writeln!(f, "<select id=\"{name}\" name=\"{name}\">")?;
            writeln!(f, "<option value=\"\">{SELECT_PLACEHOLDER}</option>")?;
            for option in field.field().options() {
                let selected = if field.value == option.value {
                    " selected"
                } else {
                    ""
                };
                writeln!(
                    f,
                    "<option value=\"{}\"{selected}>{}</option>",
                    Escaped(option.value),
                    Escaped(option.label)
                )?;
            }
            writeln!(f, "</select>")?;
        }
        Control::TextArea { rows } => {
            write!(f, "<textarea id=\"{name}\" name=\"{name}\" rows=\"{rows}\"")?;
            write_placeholder(f, spec.placeholder)?;
            // parsers drop one newline directly after the start tag
            writeln!(f, ">\n{}</textarea>", Escaped(field.value))?;
        }
        Control::Text | Control::Email | Control::Tel | Control::Url => {
            writeln!(f, "<div class=\"field\">")?;
            write_label(f, field)?;
            write!(
                f,
                "<input id=\"{name}\" name=\"{name}\" type=\"{}\" value=\"{}\"",
                input_type(spec.control),
                Escaped(field.value)
            )?;
            write_placeholder(f, spec.placeholder)?;
            writeln!(f, ">")?;
        }
    }

    if let Some(message) = field.error {
        writeln!(
            f,
            "<div class=\"error\" id=\"{name}-error\">{}</div>",
            Escaped(message)
        )?;
    }

    if matches!(
        spec.control,
        Control::Select | Control::Text | Control::Email | Control::Tel | Control::Url
    ) {
        writeln!(f, "</div>")?;
    }
    Ok(())
}

fn write_label(f: &mut Formatter<'_>, field: &FieldView<'_>) -> fmt::Result {
    let name = field.field().as_str();
    if field.is_required() {
        writeln!(
            f,
            "<label for=\"{name}\">{} {REQUIRED_MARKER}</label>",
            field.spec.label
        )
    } else {
        writeln!(f, "<label for=\"{name}\">{}</label>", field.spec.label)
    }
}

fn write_placeholder(f: &mut Formatter<'_>, placeholder: Option<&str>) -> fmt::Result {
    match placeholder {
        Some(text) => write!(f, " placeholder=\"{}\"", Escaped(text)),
        None => Ok(()),
    }
}

fn write_resume_note(f: &mut Formatter<'_>, resume: &ResumeFile) -> fmt::Result {
    writeln!(
        f,
        "<div class=\"hint\">Selected: {} ({})</div>",
        Escaped(&resume.name),
        HumanSize(resume.size_bytes)
    )
}

fn input_type(control: Control) -> &'static str {
    match control {
        Control::Email => "email",
        Control::Tel => "tel",
        Control::Url => "url",
        _ => "text",
    }
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    Escaped(raw).to_string()
}

struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(idx) = rest.find(|ch: char| matches!(ch, '&' | '<' | '>' | '"' | '\'')) {
            f.write_str(&rest[..idx])?;
            let entity = match rest.as_bytes()[idx] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            };
            f.write_str(entity)?;
            rest = &rest[idx + 1..];
        }
        f.write_str(rest)
    }
}

struct HumanSize(u64);

impl Display for HumanSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        match self.0 {
            bytes if bytes >= MB => write!(f, "{:.1} MB", bytes as f64 / MB as f64),
            bytes if bytes >= KB => write!(f, "{:.1} KB", bytes as f64 / KB as f64),
            bytes => write!(f, "{bytes} bytes"),
        }
    }
}
