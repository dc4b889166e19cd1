//! Text rendering. Each call prints only what changed since the previous view.

use career_core::{
    AppViewModel, DashboardView, ExtractedSkills, Flash, FlashLevel, JobCardView, JobResultsView,
    LoginView, Screen, SkillGapReport, SkillGapView, PERFECT_MATCH_MESSAGE,
};

use super::help::{self, APP_TITLE, DASHBOARD_TITLE, HELP_HINT};

const BAR_WIDTH: usize = 20;
const PREVIEW_CHARS: usize = 500;
const UPLOAD_PROMPT: &str = "Upload your resume (PDF) to extract skills. Type `help` for commands.";

#[derive(Default)]
pub struct Renderer {
    previous: Option<AppViewModel>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();
        let entered = self
            .previous
            .as_ref()
            .is_none_or(|previous| previous.screen != view.screen);

        match view.screen {
            Screen::Login => {
                let previous = self
                    .previous
                    .as_ref()
                    .filter(|_| !entered)
                    .map(|p| &p.login);
                render_login(&mut lines, previous, &view.login, entered);
            }
            Screen::Dashboard => {
                let previous = self
                    .previous
                    .as_ref()
                    .filter(|_| !entered)
                    .map(|p| &p.dashboard);
                render_dashboard(&mut lines, previous, &view.dashboard, entered);
            }
            Screen::Exited => {
                if entered {
                    lines.push("Goodbye.".to_string());
                }
            }
        }

        let previous_help = self.previous.as_ref().map_or(0, |p| p.help_seq);
        if view.help_seq != previous_help && view.screen != Screen::Exited {
            lines.extend(help::help_lines(view.screen));
        }
        let previous_redraw = self.previous.as_ref().map_or(0, |p| p.redraw_seq);
        if view.redraw_seq != previous_redraw && view.screen == Screen::Dashboard {
            render_snapshot(&mut lines, &view.dashboard);
        }

        self.previous = Some(view.clone());
        lines
    }
}

fn render_login(
    lines: &mut Vec<String>,
    previous: Option<&LoginView>,
    view: &LoginView,
    entered: bool,
) {
    if entered {
        lines.push(String::new());
        lines.push(format!("== {APP_TITLE} =="));
        lines.push(help::login_subtitle(view.mode).to_string());
        lines.push(HELP_HINT.to_string());
    } else if previous.is_some_and(|p| p.mode != view.mode) {
        lines.push(help::login_subtitle(view.mode).to_string());
    }

    if let Some(previous) = previous {
        if previous.email != view.email {
            lines.push(format!("Email: {}", view.email));
        }
        if previous.password_len != view.password_len && view.password_len > 0 {
            lines.push(format!("Password: {}", "*".repeat(view.password_len)));
        }
        if previous.full_name != view.full_name {
            lines.push(format!("Full name: {}", view.full_name));
        }
    }
    if view.submitting && !previous.is_some_and(|p| p.submitting) {
        lines.push("Processing...".to_string());
    }
    push_flash(
        lines,
        previous.and_then(|p| p.error.as_ref()),
        view.error.as_ref(),
    );
}

fn render_dashboard(
    lines: &mut Vec<String>,
    previous: Option<&DashboardView>,
    view: &DashboardView,
    entered: bool,
) {
    if entered {
        lines.push(String::new());
        lines.push(format!("== {DASHBOARD_TITLE} =="));
    }
    let previous_greeting = previous.and_then(|p| p.greeting.as_ref());
    match (&view.greeting, previous_greeting) {
        (Some(name), last) if last != Some(name) => {
            lines.push(format!("Welcome, {name}"));
            if last.is_none() {
                lines.push(UPLOAD_PROMPT.to_string());
            }
        }
        (None, _) if entered => lines.push("Loading...".to_string()),
        _ => {}
    }

    let upload = &view.upload;
    let previous_upload = previous.map(|p| &p.upload);
    if let Some(file) = &upload.selected_file {
        if previous_upload.and_then(|p| p.selected_file.as_ref()) != Some(file) {
            lines.push(format!("Selected: {file}"));
        }
    }
    if upload.uploading && !previous_upload.is_some_and(|p| p.uploading) {
        lines.push("Processing...".to_string());
    }
    push_flash(
        lines,
        previous_upload.and_then(|p| p.error.as_ref()),
        upload.error.as_ref(),
    );
    if let Some(extracted) = &upload.extracted {
        if previous_upload.and_then(|p| p.extracted.as_ref()) != Some(extracted) {
            render_extraction(lines, extracted);
        }
    }

    if view.extracting && !previous.is_some_and(|p| p.extracting) {
        lines.push("Extracting skills...".to_string());
    }
    let previous_skills = previous.map(|p| p.skills.as_slice()).unwrap_or_default();
    if !view.skills.is_empty() && view.skills != previous_skills {
        render_skills(lines, &view.skills);
    }

    if view.recommending && !previous.is_some_and(|p| p.recommending) {
        lines.push("Loading Recommendations...".to_string());
    }
    if let Some(results) = &view.results {
        if previous.and_then(|p| p.results.as_ref()) != Some(results) {
            lines.extend(results_lines(results));
        }
    }

    if let Some(job_id) = &view.gap_in_flight {
        if previous.and_then(|p| p.gap_in_flight.as_ref()) != Some(job_id) {
            lines.push(format!("Loading skill gap for {job_id}..."));
        }
    }
    if let Some(gap) = &view.skill_gap {
        if previous.and_then(|p| p.skill_gap.as_ref()) != Some(gap) {
            lines.extend(skill_gap_lines(&gap.0, &gap.1));
        }
    }

    push_flash(
        lines,
        previous.and_then(|p| p.notice.as_ref()),
        view.notice.as_ref(),
    );
}

/// Full dump of what the dashboard holds, for `skills` and `results`.
fn render_snapshot(lines: &mut Vec<String>, view: &DashboardView) {
    if view.skills.is_empty() {
        lines.push("No skills yet. Upload a resume or use `extract TEXT`.".to_string());
    } else {
        render_skills(lines, &view.skills);
    }
    if let Some(results) = &view.results {
        lines.extend(results_lines(results));
    }
}

fn push_flash(lines: &mut Vec<String>, previous: Option<&Flash>, current: Option<&Flash>) {
    let Some(flash) = current else {
        return;
    };
    if previous == Some(flash) {
        return;
    }
    let prefix = match flash.level {
        FlashLevel::Info => "info",
        FlashLevel::Warning => "warning",
        FlashLevel::Error => "error",
    };
    lines.push(format!("{prefix}: {}", flash.text));
}

fn render_extraction(lines: &mut Vec<String>, extracted: &ExtractedSkills) {
    lines.push("Extraction Results".to_string());
    lines.push(format!(
        "Extracted Skills ({}): {}",
        extracted.skills.len(),
        badges(&extracted.skills)
    ));
    if let Some(preview) = &extracted.text_preview {
        lines.push("Resume Text Preview:".to_string());
        lines.push(truncate_preview(preview));
    }
}

fn render_skills(lines: &mut Vec<String>, skills: &[String]) {
    lines.push(format!("Your Skills ({}): {}", skills.len(), badges(skills)));
    lines.push("Type `recommend` to get job recommendations.".to_string());
}

pub fn results_lines(results: &JobResultsView) -> Vec<String> {
    match results {
        JobResultsView::Unavailable { message } => vec![message.to_string()],
        JobResultsView::Listing {
            total_jobs_found,
            cards,
            empty_message,
        } => {
            let mut lines = vec![
                "Job Recommendations".to_string(),
                format!("Found {total_jobs_found} job recommendations based on your skills"),
            ];
            for (index, card) in cards.iter().enumerate() {
                lines.extend(card_lines(index + 1, card));
            }
            if let Some(message) = empty_message {
                lines.push(message.to_string());
            }
            lines
        }
    }
}

fn card_lines(position: usize, card: &JobCardView) -> Vec<String> {
    let mut lines = vec![
        format!("{position}. {} [{}]", card.title, card.job_id),
        format!("   {} {}", match_bar(card.bar_percent), card.match_label),
    ];
    if !card.required.is_empty() {
        let chips: Vec<String> = card
            .required
            .iter()
            .map(|chip| {
                if chip.matched {
                    format!("{} ✓", chip.name)
                } else {
                    chip.name.clone()
                }
            })
            .collect();
        lines.push(format!("   Required Skills: {}", chips.join(", ")));
    }
    match &card.gap {
        SkillGapView::PerfectMatch => lines.push(format!("   ✓ {PERFECT_MATCH_MESSAGE}")),
        SkillGapView::Missing { count, skills } => {
            lines.push(format!("   Missing Skills ({count}): {}", skills.join(", ")))
        }
    }
    lines
}

fn skill_gap_lines(job_id: &str, report: &SkillGapReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Skill gap for {job_id}: {:.1}% match",
        if report.match_percentage.is_finite() {
            report.match_percentage
        } else {
            0.0
        }
    )];
    if !report.matching_skills.is_empty() {
        lines.push(format!("   You have: {}", report.matching_skills.join(", ")));
    }
    if report.missing_skills.is_empty() {
        lines.push(format!("   ✓ {PERFECT_MATCH_MESSAGE}"));
    } else {
        lines.push(format!(
            "   Missing Skills ({}): {}",
            report.skill_gap_count,
            report.missing_skills.join(", ")
        ));
    }
    lines
}

fn match_bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn badges(skills: &[String]) -> String {
    skills
        .iter()
        .map(|skill| format!("[{skill}]"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
