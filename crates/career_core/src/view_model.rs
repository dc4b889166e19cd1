use crate::{
    AuthMode, ExtractedSkills, Flash, JobMatch, RecommendationResult, Screen, SkillGapReport,
};

pub const NO_RECOMMENDATIONS_MESSAGE: &str = "No recommendations available";
pub const NO_RESULTS_MESSAGE: &str =
    "No job recommendations found. Try uploading a resume with more skills.";
pub const PERFECT_MATCH_MESSAGE: &str = "You have all the required skills for this position!";

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub screen: Screen,
    pub login: LoginView,
    pub dashboard: DashboardView,
    pub help_seq: u64,
    pub redraw_seq: u64,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub mode: AuthMode,
    pub email: String,
    /// The password itself never reaches the view.
    pub password_len: usize,
    pub full_name: String,
    pub submitting: bool,
    pub error: Option<Flash>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub greeting: Option<String>,
    pub checking_session: bool,
    pub upload: UploadView,
    pub extracting: bool,
    pub skills: Vec<String>,
    pub can_recommend: bool,
    pub recommending: bool,
    /// `None` until recommendations have been received.
    pub results: Option<JobResultsView>,
    pub gap_in_flight: Option<String>,
    pub skill_gap: Option<(String, SkillGapReport)>,
    pub notice: Option<Flash>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    pub selected_file: Option<String>,
    pub uploading: bool,
    pub error: Option<Flash>,
    pub extracted: Option<ExtractedSkills>,
}

/// Rendering model of a recommendation result.
#[derive(Debug, Clone, PartialEq)]
pub enum JobResultsView {
    /// Nothing usable to show.
    Unavailable { message: &'static str },
    Listing {
        total_jobs_found: usize,
        cards: Vec<JobCardView>,
        /// Set when the listing has no cards.
        empty_message: Option<&'static str>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobCardView {
    pub job_id: String,
    pub title: String,
    pub match_label: String,
    /// Width of the match bar, 0..=100.
    pub bar_percent: u8,
    pub required: Vec<SkillChip>,
    pub gap: SkillGapView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillChip {
    pub name: String,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillGapView {
    PerfectMatch,
    Missing {
        count: usize,
        skills: Vec<String>,
    },
}

impl JobResultsView {
    pub fn build(result: Option<&RecommendationResult>) -> Self {
        match result {
            Some(result) => Self::from_result(result),
            None => JobResultsView::Unavailable {
                message: NO_RECOMMENDATIONS_MESSAGE,
            },
        }
    }

    /// Jobs keep the order the server sent them in.
    pub fn from_result(result: &RecommendationResult) -> Self {
        let Some(jobs) = result.recommendations.as_ref() else {
            return JobResultsView::Unavailable {
                message: NO_RECOMMENDATIONS_MESSAGE,
            };
        };
        let cards: Vec<JobCardView> = jobs.iter().map(JobCardView::from_job).collect();
        let empty_message = cards.is_empty().then_some(NO_RESULTS_MESSAGE);
        JobResultsView::Listing {
            total_jobs_found: result.total_jobs_found,
            cards,
            empty_message,
        }
    }
}

impl JobCardView {
    pub fn from_job(job: &JobMatch) -> Self {
        let required = job
            .required_skills
            .iter()
            .map(|skill| SkillChip {
                name: skill.clone(),
                matched: job.user_skills.contains(skill),
            })
            .collect();
        let gap = if job.missing_skills.is_empty() {
            SkillGapView::PerfectMatch
        } else {
            SkillGapView::Missing {
                count: job.skill_gap_count,
                skills: job.missing_skills.clone(),
            }
        };
        Self {
            job_id: job.job_id.clone(),
            title: job.job_title.clone(),
            match_label: format!("{:.1}% Match", finite_or_zero(job.match_percentage)),
            bar_percent: bar_percent(job.match_percentage),
            required,
            gap,
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn bar_percent(percentage: f64) -> u8 {
    finite_or_zero(percentage).clamp(0.0, 100.0).round() as u8
}
