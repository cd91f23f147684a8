//! Run-context metadata supplied by the CI orchestration
//!
//! Nothing here is read from the process environment; the CLI collects the
//! values (flags or CI variables) and hands them to the report engine.

/// Identity of the CI run a report belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    /// Job name
    pub job: Option<String>,
    /// Run identifier used in the run URL
    pub run_id: Option<String>,
    /// Human-facing run number
    pub run_number: Option<String>,
    /// Server URL, e.g. `https://github.com`
    pub server_url: Option<String>,
    /// Repository as `owner/name`
    pub repository: Option<String>,
    /// Branch the comparison baseline was built from
    pub base_branch: Option<String>,
    /// Branch the current snapshot was built from
    pub head_branch: Option<String>,
}

impl RunContext {
    /// Link to the run, when server, repository and run id are all known
    ///
    /// # Examples
    ///
    /// ```
    /// use native_image_report::context::RunContext;
    ///
    /// let context = RunContext {
    ///     server_url: Some("https://github.com/".to_string()),
    ///     repository: Some("acme/app".to_string()),
    ///     run_id: Some("42".to_string()),
    ///     ..RunContext::default()
    /// };
    /// assert_eq!(
    ///     context.run_url().as_deref(),
    ///     Some("https://github.com/acme/app/actions/runs/42")
    /// );
    /// ```
    pub fn run_url(&self) -> Option<String> {
        let server = self.server_url.as_deref()?.trim_end_matches('/');
        let repository = self.repository.as_deref()?;
        let run_id = self.run_id.as_deref()?;
        Some(format!("{}/{}/actions/runs/{}", server, repository, run_id))
    }

    /// Label for the baseline column
    pub fn base_label(&self) -> &str {
        self.base_branch.as_deref().unwrap_or("baseline")
    }

    /// Label for the current column
    pub fn head_label(&self) -> &str {
        self.head_branch.as_deref().unwrap_or("current")
    }
}
