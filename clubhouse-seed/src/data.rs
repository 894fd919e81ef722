//! The demo records themselves
//!
//! Shapes mirror the live site: members carry task counters, events carry
//! seat counts, and every seeded content item is already published. Ids are
//! stable (`mem-01`, `evt-03`) so demos and docs can point at records.

use chrono::NaiveDate;

use clubhouse_core::content::Author;
use clubhouse_core::tasks::{SubmissionStatus, TaskSubmission};
use clubhouse_core::{
    Account, ContentItem, ContentKind, ContentStatus, Domain, Event, EventKind, EventStatus,
    JoinRequest, JoinStatus, Member, MemberStatus, Role, Task, TaskPriority, TaskStatus,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// The three subject tracks with their leads and mentors
pub fn domains() -> Vec<Domain> {
    vec![
        Domain::new(
            "ai-ml",
            "AI / Machine Learning",
            "AI/ML",
            "Neural networks, NLP, and computer vision, from fundamentals to deployed models.",
            "Asha Iyer",
        )
        .with_mentor("Luis Ortega", "Computer Vision")
        .with_mentor("Mei Tanaka", "NLP & Transformers"),
        Domain::new(
            "web-dev",
            "Web Development",
            "Web Dev",
            "Modern frontend and backend work: frameworks, APIs, databases, and deployment.",
            "Rohan Gupta",
        )
        .with_mentor("Tessa Novak", "Frontend & UI")
        .with_mentor("Omar Haddad", "Backend & APIs"),
        Domain::new(
            "android-dev",
            "Android Development",
            "Android",
            "Kotlin and Jetpack Compose apps, from first screen to store release.",
            "Diego Marin",
        )
        .with_mentor("Ife Adeyemi", "Mobile UI")
        .with_mentor("Jonas Berg", "App Architecture"),
    ]
}

/// The demo login directory. Every role has a login to try, and each
/// track's lead has one so approvals can be exercised everywhere.
pub fn accounts() -> Vec<Account> {
    vec![
        Account::new("acct-dev", "Club Admin", "dev@club.org", "dev123", Role::Dev, None),
        Account::new(
            "acct-lead-ai",
            "Asha Iyer",
            "lead@club.org",
            "lead123",
            Role::Lead,
            Some("ai-ml".to_string()),
        ),
        Account::new(
            "acct-lead-web",
            "Rohan Gupta",
            "web.lead@club.org",
            "lead123",
            Role::Lead,
            Some("web-dev".to_string()),
        ),
        Account::new(
            "acct-lead-android",
            "Diego Marin",
            "android.lead@club.org",
            "lead123",
            Role::Lead,
            Some("android-dev".to_string()),
        ),
        Account::new(
            "acct-mentor",
            "Luis Ortega",
            "mentor@club.org",
            "mentor123",
            Role::Mentor,
            Some("ai-ml".to_string()),
        ),
        Account::new("acct-editor", "Priya Shah", "editor@club.org", "editor123", Role::Editor, None),
        Account::new(
            "acct-member",
            "Sam Okafor",
            "member@club.org",
            "member123",
            Role::Member,
            Some("ai-ml".to_string()),
        ),
        Account::new("acct-faculty", "Dr. Rao", "faculty@club.org", "faculty123", Role::Faculty, None),
    ]
}

/// Eight members across the tracks, counters included.
///
/// `member@club.org` matches the demo member login so the task loop works
/// out of the box for whoever signs in with it.
pub fn members() -> Vec<Member> {
    fn member(
        id: &str,
        name: &str,
        email: &str,
        domain: &str,
        year: u8,
        branch: &str,
        joined_at: NaiveDate,
        tasks_completed: u32,
        total_tasks: u32,
    ) -> Member {
        Member {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            domain: domain.to_string(),
            year,
            branch: branch.to_string(),
            joined_at,
            tasks_completed,
            total_tasks,
            status: MemberStatus::Active,
        }
    }

    vec![
        member("mem-01", "Sam Okafor", "member@club.org", "ai-ml", 2, "CSE", date(2025, 8, 15), 12, 15),
        member("mem-02", "Ada Lindqvist", "ada@uni.edu", "web-dev", 2, "IT", date(2025, 9, 1), 8, 10),
        member("mem-03", "Ravi Menon", "ravi@uni.edu", "android-dev", 3, "CSE", date(2025, 7, 20), 15, 18),
        member("mem-04", "Zoe Carter", "zoe@uni.edu", "ai-ml", 2, "ECE", date(2025, 10, 1), 5, 8),
        member("mem-05", "Tomas Rivera", "tomas@uni.edu", "web-dev", 3, "CSE", date(2025, 8, 10), 10, 12),
        member("mem-06", "Ines Moreau", "ines@uni.edu", "android-dev", 2, "IT", date(2025, 9, 15), 7, 9),
        member("mem-07", "Kiran Pillai", "kiran@uni.edu", "ai-ml", 3, "CSE", date(2025, 7, 1), 14, 16),
        member("mem-08", "Farah Aziz", "farah@uni.edu", "web-dev", 2, "CSE", date(2025, 10, 10), 3, 6),
    ]
}

/// Blog posts and announcements already on the public site
pub fn content() -> Vec<ContentItem> {
    #[allow(clippy::too_many_arguments)]
    fn published(
        kind: ContentKind,
        slug: &str,
        title: &str,
        excerpt: &str,
        body: &str,
        author_name: &str,
        author_email: &str,
        domain: Option<&str>,
        tags: &[&str],
        day: NaiveDate,
    ) -> ContentItem {
        ContentItem {
            slug: slug.to_string(),
            kind,
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            body: body.to_string(),
            author: Author {
                name: author_name.to_string(),
                email: author_email.to_string(),
            },
            domain: domain.map(String::from),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            date: day,
            published_at: Some(day),
            status: ContentStatus::Published,
        }
    }

    vec![
        published(
            ContentKind::BlogPost,
            "attention-from-scratch",
            "Attention from Scratch",
            "The mechanism behind modern language models, built up from a single dot product.",
            "Start with a query vector and a table of keys. Score the query against every key, \
             softmax the scores, and take the weighted sum of the values. That one operation, \
             stacked and parallelized, is most of what a transformer does.",
            "Asha Iyer",
            "lead@club.org",
            Some("ai-ml"),
            &["transformers", "nlp"],
            date(2026, 2, 5),
        ),
        published(
            ContentKind::BlogPost,
            "server-components-field-notes",
            "Server Components: Field Notes",
            "What actually changed in our rendering model after a semester of shipping server components.",
            "The mental shift is that data fetching moves into the component tree and the bundle \
             shrinks to the interactive islands. Our dashboard dropped half its client JS.",
            "Rohan Gupta",
            "web.lead@club.org",
            Some("web-dev"),
            &["react", "rendering"],
            date(2026, 1, 28),
        ),
        published(
            ContentKind::BlogPost,
            "state-in-jetpack-compose",
            "State in Jetpack Compose",
            "remember, state hoisting, and view models: where each belongs in a Compose app.",
            "Compose redraws whatever reads a changed state object. Keep state as low as it can \
             live, hoist it the moment two composables need it, and let a view model own anything \
             that must survive rotation.",
            "Diego Marin",
            "android.lead@club.org",
            Some("android-dev"),
            &["android", "kotlin"],
            date(2026, 1, 20),
        ),
        published(
            ContentKind::BlogPost,
            "winter-hackathon-recap",
            "Winter Hackathon: Results and Highlights",
            "Eleven teams, one weekend, and a sign-language translator taking first place.",
            "The winning team trained a keypoint model on a dataset they collected themselves on \
             day one. Full write-ups from the top three teams are linked inside.",
            "Luis Ortega",
            "mentor@club.org",
            Some("ai-ml"),
            &["hackathon", "community"],
            date(2026, 1, 15),
        ),
        published(
            ContentKind::BlogPost,
            "apis-that-age-well",
            "Designing APIs That Age Well",
            "Versioning, pagination, and error shapes you will not regret in a year.",
            "Every endpoint decision is a promise. The cheapest promises to keep: plural nouns, \
             cursor pagination from day one, and one error envelope everywhere.",
            "Omar Haddad",
            "omar@club.org",
            Some("web-dev"),
            &["backend", "api"],
            date(2026, 1, 5),
        ),
        published(
            ContentKind::Announcement,
            "welcome-spring-2026",
            "Welcome to Spring 2026",
            "New semester, new sessions. The calendar is live.",
            "Weekly sessions resume across all three tracks. Check the events page for the \
             workshop schedule and the spring hackathon date.",
            "Asha Iyer",
            "lead@club.org",
            None,
            &[],
            date(2026, 2, 1),
        ),
        published(
            ContentKind::Announcement,
            "ml-workshop-signups",
            "ML Workshop Signups Open",
            "Seats for the February 20 workshop are open now.",
            "The intro workshop covers preprocessing, a first model, and evaluation. Bring a \
             laptop with Python installed; everything else is provided.",
            "Asha Iyer",
            "lead@club.org",
            Some("ai-ml"),
            &[],
            date(2026, 2, 5),
        ),
        published(
            ContentKind::Announcement,
            "new-web-resources",
            "New Web Resources in the Library",
            "Fresh material on server components and API design.",
            "Two new guides landed in the resource library this week, both written by our own \
             mentors. Start with the server components field notes.",
            "Rohan Gupta",
            "web.lead@club.org",
            Some("web-dev"),
            &[],
            date(2026, 2, 3),
        ),
    ]
}

/// Pending applications, one per track
pub fn join_requests() -> Vec<JoinRequest> {
    fn pending(
        id: &str,
        name: &str,
        email: &str,
        branch: &str,
        year: u8,
        domain: &str,
        motivation: &str,
        day: NaiveDate,
    ) -> JoinRequest {
        JoinRequest {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            branch: branch.to_string(),
            year,
            domain: domain.to_string(),
            motivation: motivation.to_string(),
            date: day,
            status: JoinStatus::Pending,
            member_id: None,
        }
    }

    vec![
        pending(
            "req-01",
            "Nina Rao",
            "nina@uni.edu",
            "ECE",
            2,
            "ai-ml",
            "I want to go from following tutorials to training real models.",
            date(2026, 2, 8),
        ),
        pending(
            "req-02",
            "Paulo Mendes",
            "paulo@uni.edu",
            "IT",
            1,
            "web-dev",
            "I build small sites for friends and want to learn how teams structure real ones.",
            date(2026, 2, 7),
        ),
        pending(
            "req-03",
            "Hana Kim",
            "hana@uni.edu",
            "CSE",
            2,
            "android-dev",
            "I sketch app ideas constantly and it is time to ship one.",
            date(2026, 2, 6),
        ),
    ]
}

/// Assigned work in various stages of the submission loop
pub fn tasks() -> Vec<Task> {
    fn submission(
        member_id: &str,
        day: NaiveDate,
        status: SubmissionStatus,
        feedback: Option<&str>,
    ) -> TaskSubmission {
        TaskSubmission {
            member_id: member_id.to_string(),
            date: day,
            status,
            feedback: feedback.map(String::from),
        }
    }

    vec![
        Task {
            id: "task-01".to_string(),
            title: "Train a baseline classifier".to_string(),
            description: "Work through the starter notebook and submit a trained baseline on the \
                          provided dataset."
                .to_string(),
            domain: "ai-ml".to_string(),
            assigned_to: vec!["mem-01".to_string(), "mem-04".to_string(), "mem-07".to_string()],
            assigned_by: "mentor@club.org".to_string(),
            deadline: date(2026, 2, 15),
            priority: TaskPriority::High,
            status: TaskStatus::InProgress,
            submissions: vec![submission("mem-07", date(2026, 2, 8), SubmissionStatus::Submitted, None)],
        },
        Task {
            id: "task-02".to_string(),
            title: "Build a personal portfolio site".to_string(),
            description: "A responsive portfolio with at least three pages, deployed anywhere \
                          public."
                .to_string(),
            domain: "web-dev".to_string(),
            assigned_to: vec!["mem-02".to_string(), "mem-05".to_string(), "mem-08".to_string()],
            assigned_by: "web.lead@club.org".to_string(),
            deadline: date(2026, 2, 20),
            priority: TaskPriority::Medium,
            status: TaskStatus::InProgress,
            submissions: vec![submission(
                "mem-05",
                date(2026, 2, 6),
                SubmissionStatus::Reviewed,
                Some("Clean layout. Add a projects page next."),
            )],
        },
        Task {
            id: "task-03".to_string(),
            title: "Kotlin basics exercise set".to_string(),
            description: "Finish the exercise set and push your solutions to a public repo."
                .to_string(),
            domain: "android-dev".to_string(),
            assigned_to: vec!["mem-03".to_string(), "mem-06".to_string()],
            assigned_by: "android.lead@club.org".to_string(),
            deadline: date(2026, 2, 18),
            priority: TaskPriority::Medium,
            status: TaskStatus::InProgress,
            submissions: Vec::new(),
        },
        Task {
            id: "task-04".to_string(),
            title: "Summarize a landmark paper".to_string(),
            description: "Pick one of the listed papers and write a 500-word summary of the method."
                .to_string(),
            domain: "ai-ml".to_string(),
            assigned_to: vec!["mem-01".to_string(), "mem-04".to_string(), "mem-07".to_string()],
            assigned_by: "mentor@club.org".to_string(),
            deadline: date(2026, 2, 10),
            priority: TaskPriority::High,
            status: TaskStatus::Completed,
            submissions: vec![
                submission("mem-01", date(2026, 2, 7), SubmissionStatus::Reviewed, Some("Sharp summary.")),
                submission("mem-04", date(2026, 2, 8), SubmissionStatus::Reviewed, Some("Good grasp of the method.")),
                submission("mem-07", date(2026, 2, 6), SubmissionStatus::Reviewed, Some("Well structured.")),
            ],
        },
    ]
}

/// Four upcoming events and one already held
pub fn events() -> Vec<Event> {
    #[allow(clippy::too_many_arguments)]
    fn event(
        id: &str,
        title: &str,
        kind: EventKind,
        day: NaiveDate,
        time: &str,
        location: &str,
        description: &str,
        domain: Option<&str>,
        registered: u32,
        capacity: u32,
        status: EventStatus,
        speaker: Option<&str>,
    ) -> Event {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            date: day,
            time: time.to_string(),
            location: location.to_string(),
            description: description.to_string(),
            domain: domain.map(String::from),
            registered,
            capacity,
            status,
            speaker: speaker.map(String::from),
        }
    }

    vec![
        event(
            "evt-01",
            "Intro to Machine Learning",
            EventKind::Workshop,
            date(2026, 2, 20),
            "10:00",
            "Seminar Hall A",
            "Hands-on fundamentals: preprocessing, a first model, and how to evaluate it.",
            Some("ai-ml"),
            45,
            60,
            EventStatus::Upcoming,
            Some("Asha Iyer"),
        ),
        event(
            "evt-02",
            "Spring Hackathon",
            EventKind::Hackathon,
            date(2026, 3, 15),
            "09:00",
            "Innovation Lab",
            "Twelve hours, any stack, teams of up to four. Open across all tracks.",
            None,
            32,
            80,
            EventStatus::Upcoming,
            None,
        ),
        event(
            "evt-03",
            "Frontend Bootcamp",
            EventKind::Bootcamp,
            date(2026, 3, 1),
            "14:00",
            "Lab 204",
            "Three weekends from component basics to a deployed full-stack app.",
            Some("web-dev"),
            28,
            40,
            EventStatus::Upcoming,
            Some("Rohan Gupta"),
        ),
        event(
            "evt-04",
            "Compose App Sprint",
            EventKind::Workshop,
            date(2026, 2, 25),
            "11:00",
            "Lab 101",
            "Build and ship a complete todo app in one sitting.",
            Some("android-dev"),
            20,
            30,
            EventStatus::Upcoming,
            Some("Diego Marin"),
        ),
        event(
            "evt-05",
            "Tech Talk: Shipping ML Systems",
            EventKind::Workshop,
            date(2026, 1, 10),
            "16:00",
            "Auditorium",
            "What changes when a model leaves the notebook: serving, monitoring, drift.",
            Some("ai-ml"),
            78,
            80,
            EventStatus::Past,
            Some("Dr. Rao"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_passes_integrity_validation() {
        crate::demo().validate().unwrap();
    }

    #[test]
    fn every_track_has_a_lead_login() {
        let accounts = accounts();
        for domain in domains() {
            assert!(
                accounts
                    .iter()
                    .any(|a| a.role == Role::Lead && a.domain.as_deref() == Some(domain.id.as_str())),
                "no lead login for {}",
                domain.id
            );
        }
    }

    #[test]
    fn directory_covers_every_role() {
        let accounts = accounts();
        for role in Role::ALL {
            assert!(accounts.iter().any(|a| a.role == role), "no login for {role}");
        }
    }

    #[test]
    fn member_login_matches_a_member_record() {
        let account = accounts()
            .into_iter()
            .find(|a| a.role == Role::Member)
            .unwrap();
        let member = members()
            .into_iter()
            .find(|m| m.email == account.email)
            .expect("member login should map to a member record");
        assert_eq!(member.domain, account.domain.unwrap());
    }

    #[test]
    fn seeded_content_is_already_published() {
        for item in content() {
            assert_eq!(item.status, ContentStatus::Published, "{}", item.slug);
            assert_eq!(item.published_at, Some(item.date), "{}", item.slug);
        }
    }

    #[test]
    fn completed_tasks_have_every_submission_reviewed() {
        let completed: Vec<_> = tasks()
            .into_iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .collect();
        assert!(!completed.is_empty());
        for task in completed {
            for member_id in &task.assigned_to {
                assert!(
                    task.submissions
                        .iter()
                        .any(|s| &s.member_id == member_id
                            && s.status == SubmissionStatus::Reviewed),
                    "task {} assignee {member_id} is unreviewed",
                    task.id
                );
            }
        }
    }

    #[test]
    fn join_queue_has_one_pending_request_per_track() {
        let requests = join_requests();
        assert!(requests.iter().all(|r| r.status == JoinStatus::Pending));
        for domain in domains() {
            assert_eq!(requests.iter().filter(|r| r.domain == domain.id).count(), 1);
        }
    }
}
