//! Document model
//!
//! Documents are owned by the store; the dispatch layer only reads them.
//! Field names serialize in camelCase to match the JSON the frontend and the
//! MCP clients consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Signed,
    Rejected,
    Expired,
}

impl DocumentStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Signed => "signed",
            DocumentStatus::Rejected => "rejected",
            DocumentStatus::Expired => "expired",
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single signature slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureStatus {
    Pending,
    Signed,
    Rejected,
}

/// Final decision a signer can record on a pending signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureDecision {
    Sign,
    Reject,
}

impl From<SignatureDecision> for SignatureStatus {
    fn from(decision: SignatureDecision) -> Self {
        match decision {
            SignatureDecision::Sign => SignatureStatus::Signed,
            SignatureDecision::Reject => SignatureStatus::Rejected,
        }
    }
}

/// A user referenced by a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// One signer's slot on a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub status: SignatureStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Signature {
    /// Create a pending signature slot for a user
    pub fn pending_for(user: &User) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_email: user.email.clone(),
            status: SignatureStatus::Pending,
            signed_at: None,
            comment: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == SignatureStatus::Pending
    }
}

/// A document awaiting (or done with) signatures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: User,
    #[serde(default)]
    pub signatures: Vec<Signature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl Document {
    /// Create a new pending document with one pending signature per signer
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        created_by: User,
        signers: &[User],
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            status: DocumentStatus::Pending,
            created_at: now,
            updated_at: now,
            expires_at: None,
            created_by,
            signatures: signers.iter().map(Signature::pending_for).collect(),
            file_url: None,
        }
    }

    /// Text handed to the analysis provider: title, blank line, description
    pub fn analysis_content(&self) -> String {
        format!("{}\n\n{}", self.title, self.description)
    }

    /// Signatures still waiting for a decision, in slot order
    pub fn pending_signatures(&self) -> impl Iterator<Item = &Signature> {
        self.signatures.iter().filter(|s| s.is_pending())
    }

    /// Status implied by the current signature slots
    ///
    /// Any rejection rejects the document; the document is signed once every
    /// slot is signed. Documents without slots keep their current status.
    pub fn derived_status(&self) -> DocumentStatus {
        if self.signatures.is_empty() {
            return self.status;
        }
        if self
            .signatures
            .iter()
            .any(|s| s.status == SignatureStatus::Rejected)
        {
            DocumentStatus::Rejected
        } else if self
            .signatures
            .iter()
            .all(|s| s.status == SignatureStatus::Signed)
        {
            DocumentStatus::Signed
        } else {
            self.status
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: format!("User {id}"),
            email: format!("{id}@example.com"),
            role: None,
        }
    }

    #[test]
    fn test_document_serializes_camel_case() {
        let doc = Document::new("Contrato", "Prestação de serviços", user("u1"), &[user("u2")]);
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["status"], "pending");
        assert_eq!(json["createdBy"]["id"], "u1");
        assert_eq!(json["signatures"][0]["userId"], "u2");
        assert_eq!(json["signatures"][0]["status"], "pending");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("fileUrl").is_none());
    }

    #[test]
    fn test_analysis_content() {
        let doc = Document::new("T", "D", user("u1"), &[]);
        assert_eq!(doc.analysis_content(), "T\n\nD");
    }

    #[test]
    fn test_derived_status() {
        let mut doc = Document::new("T", "D", user("u1"), &[user("a"), user("b")]);
        assert_eq!(doc.derived_status(), DocumentStatus::Pending);

        doc.signatures[0].status = SignatureStatus::Signed;
        assert_eq!(doc.derived_status(), DocumentStatus::Pending);

        doc.signatures[1].status = SignatureStatus::Signed;
        assert_eq!(doc.derived_status(), DocumentStatus::Signed);

        doc.signatures[1].status = SignatureStatus::Rejected;
        assert_eq!(doc.derived_status(), DocumentStatus::Rejected);
    }
}
