//! Output builders for each terminal command.
//!
//! Pure functions from profile content to [`TerminalOutput`]. Nothing here
//! touches the log.

use folio_types::config::SiteConfig;
use folio_types::profile::Profile;
use folio_types::terminal::{OutputField, TerminalOutput};

use super::command::Command;

/// Hint appended below the welcome banner.
pub const WELCOME_HINT: &str = "Type 'help' to see available commands.";

/// Boxed welcome banner with the profile's name, headline, and tagline.
pub fn welcome_banner(profile: &Profile) -> TerminalOutput {
    let lines: Vec<&str> = [
        profile.name.as_str(),
        "",
        profile.headline.as_str(),
        profile.tagline.as_str(),
    ]
    .into_iter()
    .collect();

    let inner = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        + 6;

    let mut text = String::new();
    text.push_str(&format!("╔{}╗\n", "═".repeat(inner)));
    text.push_str(&format!("║{}║\n", " ".repeat(inner)));
    for line in lines {
        let pad = inner - 3 - line.chars().count();
        text.push_str(&format!("║   {line}{}║\n", " ".repeat(pad)));
    }
    text.push_str(&format!("║{}║\n", " ".repeat(inner)));
    text.push_str(&format!("╚{}╝\n", "═".repeat(inner)));
    text.push('\n');
    text.push_str(WELCOME_HINT);

    TerminalOutput::Text(text)
}

pub fn help() -> TerminalOutput {
    let mut fields = vec![OutputField::heading("Available Commands:")];
    fields.extend(
        Command::ALL
            .iter()
            .map(|cmd| OutputField::labeled(cmd.name(), cmd.description())),
    );
    TerminalOutput::Structured(fields)
}

pub fn about(profile: &Profile) -> TerminalOutput {
    let mut fields = vec![OutputField::heading(&profile.name)];
    fields.extend(profile.bio.iter().map(OutputField::body));
    if !profile.location.is_empty() {
        fields.push(OutputField::labeled("Location", &profile.location));
    }
    if !profile.education.is_empty() {
        fields.push(OutputField::labeled("Education", &profile.education));
    }
    if !profile.certifications.is_empty() {
        let names = profile
            .certifications
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        fields.push(OutputField::labeled("Certifications", names));
    }
    TerminalOutput::Structured(fields)
}

pub fn experience(profile: &Profile) -> TerminalOutput {
    let mut fields = Vec::with_capacity(profile.experience.len() * 3);
    for entry in &profile.experience {
        fields.push(OutputField::heading(format!("{} - {}", entry.company, entry.role)));
        fields.push(OutputField::muted(&entry.period));
        fields.push(OutputField::body(&entry.summary));
    }
    TerminalOutput::Structured(fields)
}

pub fn skills(profile: &Profile) -> TerminalOutput {
    let fields = profile
        .skills
        .iter()
        .map(|category| OutputField::labeled(&category.name, category.items.join(", ")))
        .collect();
    TerminalOutput::Structured(fields)
}

pub fn projects(profile: &Profile) -> TerminalOutput {
    let mut fields = vec![OutputField::heading("Featured Projects:")];
    fields.extend(
        profile
            .projects
            .iter()
            .map(|p| OutputField::body(format!("• {} - {}", p.name, p.description))),
    );
    TerminalOutput::Structured(fields)
}

pub fn resume() -> TerminalOutput {
    TerminalOutput::Text("Opening resume...".to_string())
}

pub fn contact(profile: &Profile, config: &SiteConfig) -> TerminalOutput {
    let contact = &profile.contact;
    let mut fields = vec![
        OutputField::heading("Contact Information:"),
        OutputField::link("Email", &contact.email),
    ];
    if let Some(linkedin) = &contact.linkedin {
        fields.push(OutputField::link("LinkedIn", linkedin));
    }
    if let Some(github) = &contact.github {
        fields.push(OutputField::link("GitHub", github));
    }
    if let Some(calendar) = config.calendar_url.as_ref().filter(|url| !url.is_empty()) {
        fields.push(OutputField::link("Book a call", calendar));
    }
    TerminalOutput::Structured(fields)
}
