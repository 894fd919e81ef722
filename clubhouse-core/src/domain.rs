//! Subject-track domains from the seed catalog
//!
//! Domains are read-only to the core: they arrive with the seed data and
//! every domain reference elsewhere (content, members, tasks, events) must
//! resolve to one of them.

use serde::{Deserialize, Serialize};

/// Identifier of a subject track, e.g. `"ai-ml"`
pub type DomainId = String;

/// A subject track with its own lead, mentors and members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Stable identifier used by every cross-reference
    pub id: DomainId,
    /// Full display name, e.g. "AI / Machine Learning"
    pub name: String,
    /// Short label for chrome, e.g. "AI/ML"
    pub short_name: String,
    /// What the track covers
    pub description: String,
    /// Display name of the current lead.
    ///
    /// A weak back-reference: the authoritative pairing is the account
    /// carrying the lead role with this domain id.
    pub lead: String,
    /// Mentors attached to the track
    #[serde(default)]
    pub mentors: Vec<Mentor>,
}

/// A mentor listed under a domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentor {
    pub name: String,
    pub specialty: String,
}

impl Domain {
    /// Create a domain with no mentors attached
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        short_name: impl Into<String>,
        description: impl Into<String>,
        lead: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short_name: short_name.into(),
            description: description.into(),
            lead: lead.into(),
            mentors: Vec::new(),
        }
    }

    /// Attach a mentor
    pub fn with_mentor(mut self, name: impl Into<String>, specialty: impl Into<String>) -> Self {
        self.mentors.push(Mentor {
            name: name.into(),
            specialty: specialty.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_attaches_mentors() {
        let domain = Domain::new("ai-ml", "AI / Machine Learning", "AI/ML", "ML track", "Asha")
            .with_mentor("Ravi", "Computer Vision")
            .with_mentor("Lena", "NLP");

        assert_eq!(domain.id, "ai-ml");
        assert_eq!(domain.mentors.len(), 2);
        assert_eq!(domain.mentors[1].specialty, "NLP");
    }

    #[test]
    fn serialization_keeps_mentor_list() {
        let domain = Domain::new("web-dev", "Web Development", "Web Dev", "Web track", "Priya")
            .with_mentor("Mira", "Backend & APIs");

        let json = serde_json::to_string(&domain).unwrap();
        let parsed: Domain = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, domain);
    }
}
