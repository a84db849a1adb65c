use crate::api::ImproveRequest;

/// Which form field has the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    RepoPath,
    Prompt,
}

/// Repository path + instruction, submitted to `/chatv1`
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub repo_path: String,
    pub prompt: String,
    pub focus: FormField,
    /// Inline error shown under the fields
    pub error: Option<String>,
}

impl SubmissionForm {
    pub fn new(repo_path: Option<&str>) -> Self {
        Self {
            repo_path: repo_path.unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::RepoPath => &mut self.repo_path,
            FormField::Prompt => &mut self.prompt,
        }
    }

    pub fn push(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn pop(&mut self) {
        self.focused_mut().pop();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::RepoPath => FormField::Prompt,
            FormField::Prompt => FormField::RepoPath,
        };
    }

    /// Build the request, or record the validation error and return `None`.
    pub fn submit(&mut self) -> Option<ImproveRequest> {
        match ImproveRequest::new(&self.repo_path, &self.prompt) {
            Ok(request) => {
                self.error = None;
                Some(request)
            }
            Err(err) => {
                self.error = Some(err.user_message());
                None
            }
        }
    }
}
