//! Wire types for the improvement backend
//!
//! Every substructure of a result is optional. `None` means the backend did
//! not send the field at all, which the views render differently from an
//! empty list.

use super::error::{ApiError, ApiResult};
use indexmap::IndexMap;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ═══════════════════════════════════════════════════════════════════════════
//  IMPROVEMENT RESULT
// ═══════════════════════════════════════════════════════════════════════════

// Result documents are partly LLM output: a malformed substructure decodes
// as absent instead of failing the whole document.

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A list of display strings; non-string entries become compact JSON.
fn text_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(items.into_iter().map(into_text).collect())),
        _ => Ok(None),
    }
}

/// A display string; null becomes empty, anything else compact JSON.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(into_text)
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn into_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default, deserialize_with = "text_list")]
    pub files_to_modify: Option<Vec<String>>,
    #[serde(default, deserialize_with = "text_list")]
    pub files_to_create: Option<Vec<String>>,
    #[serde(default, deserialize_with = "text_list")]
    pub implementation_steps: Option<Vec<String>>,
    #[serde(default, deserialize_with = "text_list")]
    pub potential_risks: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changes {
    #[serde(default, deserialize_with = "text_list")]
    pub modified_files: Option<Vec<String>>,
    #[serde(default, deserialize_with = "text_list")]
    pub created_files: Option<Vec<String>>,
    #[serde(default, deserialize_with = "text_list")]
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResults {
    #[serde(default, deserialize_with = "or_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub output: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
}

/// One suggested fix from the failing-test analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedFix {
    #[serde(default, deserialize_with = "text")]
    pub file: String,
    #[serde(default, deserialize_with = "text")]
    pub issue: String,
    #[serde(default, deserialize_with = "text")]
    pub fix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestAnalysis {
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub root_causes: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub fixes: Option<Vec<SuggestedFix>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTests {
    /// Usually strings; anything else is shown as compact JSON
    #[serde(default, deserialize_with = "lenient")]
    pub generated_tests: Option<Vec<Value>>,
}

/// Structured output of one improvement request.
///
/// Immutable once received. The verbatim document is kept alongside the
/// typed projection so the raw view can show fields this client does not
/// model.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImprovementResult {
    #[serde(default, deserialize_with = "lenient")]
    change_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub plan: Option<Plan>,
    #[serde(default, deserialize_with = "lenient")]
    pub changes: Option<Changes>,
    #[serde(default, deserialize_with = "lenient")]
    pub test_results: Option<TestResults>,
    #[serde(default, deserialize_with = "lenient")]
    pub test_analysis: Option<TestAnalysis>,
    #[serde(default, deserialize_with = "lenient")]
    pub tests: Option<GeneratedTests>,
    #[serde(skip)]
    raw: Value,
}

impl ImprovementResult {
    /// Decode a backend document, keeping the original alongside.
    ///
    /// Fails only when the document is not a JSON object.
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        if !raw.is_object() {
            return Err(de::Error::custom("result document is not a JSON object"));
        }
        let mut result: Self = serde_json::from_value(raw.clone())?;
        result.raw = raw;
        Ok(result)
    }

    /// Change id, if the backend assigned a non-empty one
    pub fn change_id(&self) -> Option<&str> {
        self.change_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Pretty-printed verbatim document (backend key order preserved)
    pub fn raw_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }

    pub fn generated_tests(&self) -> Option<&[Value]> {
        self.tests
            .as_ref()
            .and_then(|tests| tests.generated_tests.as_deref())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  FILE CHANGES
// ═══════════════════════════════════════════════════════════════════════════

/// Per-file bundle of diff text plus full before/after contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChangeRecord {
    #[serde(default)]
    pub diff: Option<String>,
    /// `None` means the file was newly created
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    current: Option<String>,
}

impl FileChangeRecord {
    pub fn new(diff: Option<&str>, original: Option<&str>, current: &str) -> Self {
        Self {
            diff: diff.map(str::to_string),
            original: original.map(str::to_string),
            current: Some(current.to_string()),
        }
    }

    pub fn current(&self) -> &str {
        self.current.as_deref().unwrap_or("")
    }

    pub fn is_new_file(&self) -> bool {
        self.original.is_none()
    }
}

/// File path → change record, in the order the backend listed them
pub type FileChangeMap = IndexMap<String, FileChangeRecord>;

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FileChangesResponse {
    #[serde(default)]
    pub file_changes: Option<FileChangeMap>,
}

// ═══════════════════════════════════════════════════════════════════════════
//  REQUESTS AND SMALL RESPONSES
// ═══════════════════════════════════════════════════════════════════════════

pub const IMPROVE_FIELDS_REQUIRED: &str = "Both repo path and improvement prompt are required";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImproveRequest {
    pub repo_path: String,
    pub prompt: String,
}

impl ImproveRequest {
    /// Both fields are trimmed and must be non-blank.
    pub fn new(repo_path: &str, prompt: &str) -> ApiResult<Self> {
        let (repo_path, prompt) = (repo_path.trim(), prompt.trim());
        if repo_path.is_empty() || prompt.is_empty() {
            return Err(ApiError::Validation(IMPROVE_FIELDS_REQUIRED.to_string()));
        }
        Ok(Self {
            repo_path: repo_path.to_string(),
            prompt: prompt.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptRequest {
    pub change_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FileChangesRequest<'a> {
    pub change_id: &'a str,
}

/// Body of a successful accept. Only its presence is meaningful; the
/// commit message is surfaced when the backend echoes it back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AcceptOutcome {
    #[serde(default)]
    pub change_id: Option<String>,
    #[serde(default)]
    pub commit_message: Option<String>,
}

/// A change the backend still holds for later commit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PendingChange {
    pub change_id: String,
    #[serde(default)]
    pub requirement: String,
    #[serde(default)]
    pub repo_path: String,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub test_success: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PendingChangesResponse {
    #[serde(default)]
    pub pending_changes: Vec<PendingChange>,
}
