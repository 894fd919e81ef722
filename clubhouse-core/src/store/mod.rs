//! In-memory state: one store, one lock per collection
//!
//! Queries hand out clones, never guarded references, so callers cannot
//! hold a lock across their own logic. Mutation goes through closure-taking
//! methods that run check-and-apply under the collection's write lock; the
//! workflow engines are the only callers. Join requests and members share
//! the [`MembershipTable`] lock so approval commits as one unit.

mod persist;
mod snapshot;

pub use persist::{JsonFileStore, MemoryStore, PersistError, PersistencePort};
pub use snapshot::{IntegrityError, SeedData, Snapshot};

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::content::{ContentItem, ContentStatus};
use crate::domain::Domain;
use crate::error::WorkflowError;
use crate::events::{Event, EventStatus};
use crate::membership::{JoinRequest, JoinStatus, Member};
use crate::tasks::Task;

/// Join requests and members behind a single lock
#[derive(Debug, Default)]
pub struct MembershipTable {
    pub join_requests: HashMap<String, JoinRequest>,
    pub members: HashMap<String, Member>,
}

/// Owner of every entity collection
pub struct ClubStore {
    domains: Vec<Domain>,
    content: RwLock<HashMap<String, ContentItem>>,
    membership: RwLock<MembershipTable>,
    tasks: RwLock<HashMap<String, Task>>,
    events: RwLock<HashMap<String, Event>>,
}

impl ClubStore {
    /// An empty store over the given domain catalog
    pub fn new(domains: Vec<Domain>) -> Self {
        Self {
            domains,
            content: RwLock::new(HashMap::new()),
            membership: RwLock::new(MembershipTable::default()),
            tasks: RwLock::new(HashMap::new()),
            events: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn from_collections(
        domains: Vec<Domain>,
        content: Vec<ContentItem>,
        join_requests: Vec<JoinRequest>,
        members: Vec<Member>,
        tasks: Vec<Task>,
        events: Vec<Event>,
    ) -> Self {
        Self {
            domains,
            content: RwLock::new(content.into_iter().map(|c| (c.slug.clone(), c)).collect()),
            membership: RwLock::new(MembershipTable {
                join_requests: join_requests.into_iter().map(|r| (r.id.clone(), r)).collect(),
                members: members.into_iter().map(|m| (m.id.clone(), m)).collect(),
            }),
            tasks: RwLock::new(tasks.into_iter().map(|t| (t.id.clone(), t)).collect()),
            events: RwLock::new(events.into_iter().map(|e| (e.id.clone(), e)).collect()),
        }
    }

    // ---- domains ----

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn domain(&self, id: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.id == id)
    }

    pub fn has_domain(&self, id: &str) -> bool {
        self.domain(id).is_some()
    }

    pub(crate) fn require_domain(&self, id: &str) -> Result<(), WorkflowError> {
        if self.has_domain(id) {
            Ok(())
        } else {
            Err(WorkflowError::UnknownDomain(id.to_string()))
        }
    }

    // ---- content ----

    pub fn content(&self, slug: &str) -> Option<ContentItem> {
        self.content.read().get(slug).cloned()
    }

    /// Every content item, newest first
    pub fn content_list(&self) -> Vec<ContentItem> {
        let mut items: Vec<_> = self.content.read().values().cloned().collect();
        items.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        items
    }

    /// Published items, newest first
    pub fn published(&self) -> Vec<ContentItem> {
        self.content_list()
            .into_iter()
            .filter(|c| c.status == ContentStatus::Published)
            .collect()
    }

    /// Items waiting on an approval decision
    pub fn pending_content(&self) -> Vec<ContentItem> {
        self.content_list()
            .into_iter()
            .filter(|c| c.status == ContentStatus::Pending)
            .collect()
    }

    pub(crate) fn insert_content(&self, item: ContentItem) -> Result<ContentItem, WorkflowError> {
        let mut content = self.content.write();
        if content.contains_key(&item.slug) {
            return Err(WorkflowError::DuplicateSlug(item.slug));
        }
        content.insert(item.slug.clone(), item.clone());
        Ok(item)
    }

    pub(crate) fn update_content<R>(
        &self,
        slug: &str,
        f: impl FnOnce(&mut ContentItem) -> Result<R, WorkflowError>,
    ) -> Result<R, WorkflowError> {
        let mut content = self.content.write();
        let item = content
            .get_mut(slug)
            .ok_or_else(|| WorkflowError::ContentNotFound(slug.to_string()))?;
        f(item)
    }

    pub(crate) fn remove_content(
        &self,
        slug: &str,
        check: impl FnOnce(&ContentItem) -> Result<(), WorkflowError>,
    ) -> Result<ContentItem, WorkflowError> {
        let mut content = self.content.write();
        let item = content
            .remove(slug)
            .ok_or_else(|| WorkflowError::ContentNotFound(slug.to_string()))?;
        if let Err(err) = check(&item) {
            content.insert(item.slug.clone(), item);
            return Err(err);
        }
        Ok(item)
    }

    // ---- membership ----

    pub fn join_request(&self, id: &str) -> Option<JoinRequest> {
        self.membership.read().join_requests.get(id).cloned()
    }

    /// Every join request, newest first
    pub fn join_requests(&self) -> Vec<JoinRequest> {
        let mut requests: Vec<_> = self.membership.read().join_requests.values().cloned().collect();
        requests.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        requests
    }

    pub fn pending_requests(&self) -> Vec<JoinRequest> {
        self.join_requests()
            .into_iter()
            .filter(|r| r.status == JoinStatus::Pending)
            .collect()
    }

    pub fn member(&self, id: &str) -> Option<Member> {
        self.membership.read().members.get(id).cloned()
    }

    pub fn member_by_email(&self, email: &str) -> Option<Member> {
        self.membership
            .read()
            .members
            .values()
            .find(|m| m.email == email)
            .cloned()
    }

    /// Every member, sorted by name
    pub fn members(&self) -> Vec<Member> {
        let mut members: Vec<_> = self.membership.read().members.values().cloned().collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        members
    }

    pub fn members_in_domain(&self, domain: &str) -> Vec<Member> {
        self.members()
            .into_iter()
            .filter(|m| m.domain == domain)
            .collect()
    }

    pub(crate) fn insert_join_request(&self, request: JoinRequest) -> JoinRequest {
        let mut table = self.membership.write();
        table
            .join_requests
            .insert(request.id.clone(), request.clone());
        request
    }

    pub(crate) fn insert_member(&self, member: Member) -> Member {
        let mut table = self.membership.write();
        table.members.insert(member.id.clone(), member.clone());
        member
    }

    /// Run check-and-apply across requests and members as one unit
    pub(crate) fn update_membership<R>(
        &self,
        f: impl FnOnce(&mut MembershipTable) -> Result<R, WorkflowError>,
    ) -> Result<R, WorkflowError> {
        let mut table = self.membership.write();
        f(&mut table)
    }

    pub(crate) fn update_member<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Member) -> Result<R, WorkflowError>,
    ) -> Result<R, WorkflowError> {
        let mut table = self.membership.write();
        let member = table
            .members
            .get_mut(id)
            .ok_or_else(|| WorkflowError::MemberNotFound(id.to_string()))?;
        f(member)
    }

    // ---- tasks ----

    pub fn task(&self, id: &str) -> Option<Task> {
        self.tasks.read().get(id).cloned()
    }

    /// Every task, earliest deadline first
    pub fn tasks(&self) -> Vec<Task> {
        let mut tasks: Vec<_> = self.tasks.read().values().cloned().collect();
        tasks.sort_by(|a, b| a.deadline.cmp(&b.deadline).then_with(|| a.id.cmp(&b.id)));
        tasks
    }

    pub fn tasks_for_member(&self, member_id: &str) -> Vec<Task> {
        self.tasks()
            .into_iter()
            .filter(|t| t.assigned_to.iter().any(|id| id == member_id))
            .collect()
    }

    pub(crate) fn insert_task(&self, task: Task) -> Task {
        self.tasks.write().insert(task.id.clone(), task.clone());
        task
    }

    pub(crate) fn update_task<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Task) -> Result<R, WorkflowError>,
    ) -> Result<R, WorkflowError> {
        let mut tasks = self.tasks.write();
        let task = tasks
            .get_mut(id)
            .ok_or_else(|| WorkflowError::TaskNotFound(id.to_string()))?;
        f(task)
    }

    // ---- events ----

    pub fn event(&self, id: &str) -> Option<Event> {
        self.events.read().get(id).cloned()
    }

    /// Every event, soonest first
    pub fn events(&self) -> Vec<Event> {
        let mut events: Vec<_> = self.events.read().values().cloned().collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        events
    }

    pub fn upcoming_events(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.status == EventStatus::Upcoming)
            .collect()
    }

    pub(crate) fn insert_event(&self, event: Event) -> Event {
        self.events.write().insert(event.id.clone(), event.clone());
        event
    }

    pub(crate) fn update_event<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Event) -> Result<R, WorkflowError>,
    ) -> Result<R, WorkflowError> {
        let mut events = self.events.write();
        let event = events
            .get_mut(id)
            .ok_or_else(|| WorkflowError::EventNotFound(id.to_string()))?;
        f(event)
    }

    // ---- snapshot support ----

    /// Clone every collection for a durable snapshot, in stable order
    pub(crate) fn collections(
        &self,
    ) -> (Vec<ContentItem>, Vec<JoinRequest>, Vec<Member>, Vec<Task>, Vec<Event>) {
        let mut content: Vec<_> = self.content.read().values().cloned().collect();
        content.sort_by(|a, b| a.slug.cmp(&b.slug));

        let (mut requests, mut members) = {
            let table = self.membership.read();
            (
                table.join_requests.values().cloned().collect::<Vec<_>>(),
                table.members.values().cloned().collect::<Vec<_>>(),
            )
        };
        requests.sort_by(|a, b| a.id.cmp(&b.id));
        members.sort_by(|a, b| a.id.cmp(&b.id));

        let mut tasks: Vec<_> = self.tasks.read().values().cloned().collect();
        tasks.sort_by(|a, b| a.id.cmp(&b.id));

        let mut events: Vec<_> = self.events.read().values().cloned().collect();
        events.sort_by(|a, b| a.id.cmp(&b.id));

        (content, requests, members, tasks, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::content::{Author, ContentKind};
    use crate::domain::Domain;
    use crate::membership::MemberStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(slug: &str, status: ContentStatus, day: u32) -> ContentItem {
        ContentItem {
            slug: slug.to_string(),
            kind: ContentKind::BlogPost,
            title: slug.to_string(),
            excerpt: String::new(),
            body: String::new(),
            author: Author {
                name: "Priya Shah".to_string(),
                email: "editor@club.org".to_string(),
            },
            domain: None,
            tags: Vec::new(),
            date: date(2025, 9, day),
            published_at: None,
            status,
        }
    }

    fn store() -> ClubStore {
        ClubStore::new(vec![Domain::new(
            "ai-ml",
            "AI & Machine Learning",
            "AI/ML",
            "Models and the math behind them",
            "Asha Iyer",
        )])
    }

    #[test]
    fn duplicate_slug_is_rejected_under_the_lock() {
        let store = store();
        store.insert_content(item("intro", ContentStatus::Draft, 1)).unwrap();
        let err = store
            .insert_content(item("intro", ContentStatus::Draft, 2))
            .unwrap_err();
        assert_eq!(err, WorkflowError::DuplicateSlug("intro".to_string()));
    }

    #[test]
    fn content_views_filter_by_status() {
        let store = store();
        store.insert_content(item("a", ContentStatus::Published, 3)).unwrap();
        store.insert_content(item("b", ContentStatus::Pending, 2)).unwrap();
        store.insert_content(item("c", ContentStatus::Published, 5)).unwrap();

        let published: Vec<_> = store.published().into_iter().map(|c| c.slug).collect();
        assert_eq!(published, vec!["c".to_string(), "a".to_string()]);
        assert_eq!(store.pending_content().len(), 1);
        assert_eq!(store.content_list().len(), 3);
    }

    #[test]
    fn update_reports_missing_records() {
        let store = store();
        let err = store.update_content("ghost", |_| Ok(())).unwrap_err();
        assert_eq!(err, WorkflowError::ContentNotFound("ghost".to_string()));

        let err = store.update_member("ghost", |_| Ok(())).unwrap_err();
        assert_eq!(err, WorkflowError::MemberNotFound("ghost".to_string()));
    }

    #[test]
    fn failed_check_leaves_content_in_place() {
        let store = store();
        store.insert_content(item("keep", ContentStatus::Draft, 1)).unwrap();
        let err = store
            .remove_content("keep", |_| Err(WorkflowError::ContentNotFound("x".into())))
            .unwrap_err();
        assert!(matches!(err, WorkflowError::ContentNotFound(_)));
        assert!(store.content("keep").is_some());
    }

    #[test]
    fn member_lookup_by_email_and_domain() {
        let store = store();
        store.insert_member(Member {
            id: "mem-1".to_string(),
            name: "Sam Okafor".to_string(),
            email: "sam@club.org".to_string(),
            domain: "ai-ml".to_string(),
            year: 2,
            branch: "CSE".to_string(),
            joined_at: date(2025, 8, 15),
            tasks_completed: 0,
            total_tasks: 0,
            status: MemberStatus::Active,
        });

        assert_eq!(store.member_by_email("sam@club.org").unwrap().id, "mem-1");
        assert!(store.member_by_email("ghost@club.org").is_none());
        assert_eq!(store.members_in_domain("ai-ml").len(), 1);
        assert!(store.members_in_domain("web-dev").is_empty());
    }

    #[test]
    fn domain_catalog_is_queryable() {
        let store = store();
        assert!(store.has_domain("ai-ml"));
        assert!(!store.has_domain("robotics"));
        assert_eq!(store.domain("ai-ml").unwrap().short_name, "AI/ML");
        assert!(matches!(
            store.require_domain("robotics"),
            Err(WorkflowError::UnknownDomain(_))
        ));
    }
}
