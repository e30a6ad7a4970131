//! Per-call failure policy table.

/// What a failed fetch does to the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the analysis with a request-level error.
    Abort,
    /// Log the failure and leave the corresponding field absent.
    Degrade,
}

/// The fetches an analysis performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchCall {
    /// Repository metadata.
    Metadata,
    /// Top-level directory listing.
    Listing,
    /// A checklist file's content.
    FileContent,
    /// The license file's content.
    LicenseContent,
}

impl FetchCall {
    /// Short name used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Listing => "listing",
            Self::FileContent => "file_content",
            Self::LicenseContent => "license_content",
        }
    }
}

/// Failure policy for every fetch an analysis performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailurePolicies {
    metadata: FailurePolicy,
    listing: FailurePolicy,
    file_content: FailurePolicy,
    license_content: FailurePolicy,
}

/// Metadata is fatal; everything after it only degrades the summary.
pub const DEFAULT_FAILURE_POLICIES: FailurePolicies = FailurePolicies {
    metadata: FailurePolicy::Abort,
    listing: FailurePolicy::Degrade,
    file_content: FailurePolicy::Degrade,
    license_content: FailurePolicy::Degrade,
};

impl Default for FailurePolicies {
    fn default() -> Self {
        DEFAULT_FAILURE_POLICIES
    }
}

impl FailurePolicies {
    /// Returns the policy for a call.
    #[must_use]
    pub const fn policy_for(&self, call: FetchCall) -> FailurePolicy {
        match call {
            FetchCall::Metadata => self.metadata,
            FetchCall::Listing => self.listing,
            FetchCall::FileContent => self.file_content,
            FetchCall::LicenseContent => self.license_content,
        }
    }

    /// Overrides the directory-listing policy, the only configurable entry.
    #[must_use]
    pub fn with_listing(mut self, policy: FailurePolicy) -> Self {
        self.listing = policy;
        self
    }
}
