use serde::{Deserialize, Serialize};

/// The closed intent catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    SimpleQa,
    GrammarCorrection,
    WorldKnowledge,
    RankingQuery,
    CodeTask,
    MathReasoning,
    SqlQuery,
    DataAnalysis,
    Creative,
    DecisionMaking,
    Learning,
    Memory,
    MultiStep,
    DebugLog,
    HtmlMarkup,
    AnalysisReport,
    Visualization,
    ProofSolving,
    SystemDesign,
    FormulaGeneration,
    Riddle,
}

impl Intent {
    /// All catalog members, in the fixed scoring order used by the classifier.
    pub const ALL: [Intent; 21] = [
        Intent::SimpleQa,
        Intent::GrammarCorrection,
        Intent::WorldKnowledge,
        Intent::RankingQuery,
        Intent::CodeTask,
        Intent::MathReasoning,
        Intent::SqlQuery,
        Intent::DataAnalysis,
        Intent::Creative,
        Intent::DecisionMaking,
        Intent::Learning,
        Intent::Memory,
        Intent::MultiStep,
        Intent::DebugLog,
        Intent::HtmlMarkup,
        Intent::AnalysisReport,
        Intent::Visualization,
        Intent::ProofSolving,
        Intent::SystemDesign,
        Intent::FormulaGeneration,
        Intent::Riddle,
    ];
}

/// Confidence tier, derived from the top score and the margin to the runner-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Complexity tier, derived independently of intent score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplexityTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Output of the intent classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentVerdict {
    pub intent: Intent,
    pub confidence: ConfidenceTier,
    pub score: i32,
    pub requires_web: bool,
    pub preferred_model: String,
    pub primary_tools: Vec<String>,
    pub flexible_tools: bool,
    pub complexity: ComplexityTier,
    /// Top-k alternative intents with their raw scores, highest first.
    pub alternatives: Vec<(Intent, i32)>,
    pub has_question_mark: bool,
    pub has_code: bool,
    pub has_sql: bool,
    pub has_html: bool,
    pub has_formula: bool,
    pub has_math: bool,
    pub word_count: usize,
}

/// Optional per-request hints the classifier's caller supplies beyond the
/// bare prompt text, nudging the score toward a known-likely intent.
#[derive(Debug, Clone, Default)]
pub struct ClassifierContext {
    /// The intent classified for this user's previous turn, if any.
    pub previous_intent: Option<Intent>,
    /// An intent the user has pinned as a standing preference.
    pub user_preference: Option<Intent>,
    /// Intents explicitly excluded from consideration for this request.
    pub excluded: Vec<Intent>,
}
