use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use shared_models::response::Page;
use shared_utils::pagination::ListingQuery;
use shared_utils::seed::derive_rng;

use crate::models::{
    ContentError, EducationalResource, Notification, ResourceFormat, Workshop, WorkshopMode,
};

pub const RESOURCE_COUNT: u64 = 30;
pub const WORKSHOP_COUNT: u64 = 12;
pub const NOTIFICATION_COUNT: u64 = 15;

// Distinct generator streams per collection
const RESOURCE_STREAM: u64 = 0x5245_534F;
const WORKSHOP_STREAM: u64 = 0x574B_5348;
const NOTIFICATION_STREAM: u64 = 0x4E4F_5449;

const TOPICS: [(&str, &str); 10] = [
    ("Understanding Your Marriage Contract", "family"),
    ("Islamic Inheritance Basics", "inheritance"),
    ("Halal Investing Fundamentals", "finance"),
    ("Tenant Rights Explained", "property"),
    ("Starting a Business Legally", "business"),
    ("Calculating Zakat", "finance"),
    ("Reading an Employment Contract", "employment"),
    ("Writing a Valid Will", "inheritance"),
    ("Preparing Immigration Paperwork", "immigration"),
    ("Resolving Family Disputes", "family"),
];

const FORMATS: [ResourceFormat; 3] = [ResourceFormat::Article, ResourceFormat::Video, ResourceFormat::Guide];

const HOSTS: [&str; 5] = [
    "Sarah Al-Mansouri",
    "Sheikh Ibrahim Qureshi",
    "Omar Haddad",
    "Aisha Bakr",
    "Layla Rahman",
];

const NOTIFICATION_TEMPLATES: [(&str, &str, &str); 5] = [
    ("booking", "Consultation confirmed", "Your consultation booking has been confirmed."),
    ("reminder", "Upcoming consultation", "Reminder: you have a consultation coming up soon."),
    ("workshop", "New workshop announced", "A new workshop matching your interests is open for registration."),
    ("resource", "New resource available", "A new educational resource has been published."),
    ("system", "Profile update", "Your account details were updated successfully."),
];

/// Static mock content, generated once from the configured seed.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    resources: Vec<EducationalResource>,
    workshops: Vec<Workshop>,
    notifications: Vec<Notification>,
}

impl ContentCatalog {
    pub fn new(
        resources: Vec<EducationalResource>,
        workshops: Vec<Workshop>,
        notifications: Vec<Notification>,
    ) -> Self {
        Self {
            resources,
            workshops,
            notifications,
        }
    }

    pub fn generate(seed: u64, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let catalog = Self::new(
            generate_resources(seed, today),
            generate_workshops(seed, today),
            generate_notifications(seed, now),
        );

        info!(
            "Generated content catalog: {} resources, {} workshops, {} notifications",
            catalog.resources.len(),
            catalog.workshops.len(),
            catalog.notifications.len()
        );
        catalog
    }

    // ==============================================================================
    // EDUCATIONAL RESOURCES
    // ==============================================================================

    pub fn resources(&self) -> &[EducationalResource] {
        &self.resources
    }

    pub fn list_resources(&self, category: Option<&str>, query: &ListingQuery) -> Page<EducationalResource> {
        let category = category
            .map(|raw| raw.trim().to_lowercase())
            .filter(|raw| !raw.is_empty());

        debug!("Listing resources category={:?} query={:?}", category, query);

        let filtered = self
            .resources
            .iter()
            .filter(|resource| category.as_deref().map_or(true, |wanted| resource.category == wanted));

        query.apply(filtered)
    }

    pub fn find_resource(&self, resource_id: u64) -> Result<&EducationalResource, ContentError> {
        self.resources
            .iter()
            .find(|resource| resource.id == resource_id)
            .ok_or(ContentError::ResourceNotFound)
    }

    // ==============================================================================
    // WORKSHOPS
    // ==============================================================================

    pub fn list_workshops(&self, query: &ListingQuery) -> Page<Workshop> {
        query.apply(&self.workshops)
    }

    pub fn find_workshop(&self, workshop_id: u64) -> Result<&Workshop, ContentError> {
        self.workshops
            .iter()
            .find(|workshop| workshop.id == workshop_id)
            .ok_or(ContentError::WorkshopNotFound)
    }

    /// Workshops on or after `today`, soonest first.
    pub fn upcoming_workshops(&self, today: NaiveDate, limit: usize) -> Vec<Workshop> {
        let mut upcoming: Vec<Workshop> = self
            .workshops
            .iter()
            .filter(|workshop| workshop.date >= today)
            .cloned()
            .collect();
        upcoming.sort_by_key(|workshop| (workshop.date, workshop.id));
        upcoming.truncate(limit);
        upcoming
    }

    // ==============================================================================
    // NOTIFICATIONS
    // ==============================================================================

    pub fn list_notifications(&self, query: &ListingQuery) -> Page<Notification> {
        query.apply(&self.notifications)
    }

    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

fn generate_resources(seed: u64, today: NaiveDate) -> Vec<EducationalResource> {
    let mut rng = derive_rng(seed, RESOURCE_STREAM);

    (1..=RESOURCE_COUNT)
        .map(|id| {
            let (topic, category) = TOPICS[(id as usize - 1) % TOPICS.len()];
            let format = *FORMATS.choose(&mut rng).unwrap_or(&ResourceFormat::Article);
            EducationalResource {
                id,
                title: format!("{} ({})", topic, format.label()),
                description: format!(
                    "A short {} on {} for everyday questions.",
                    format.label(),
                    topic.to_lowercase()
                ),
                category: category.to_string(),
                format,
                duration_minutes: rng.gen_range(5..=45),
                thumbnail: format!("https://images.consult-mock.app/resources/{}.jpg", id),
                published_at: today - Duration::days(rng.gen_range(1..=365)),
            }
        })
        .collect()
}

fn generate_workshops(seed: u64, today: NaiveDate) -> Vec<Workshop> {
    let mut rng = derive_rng(seed, WORKSHOP_STREAM);

    (1..=WORKSHOP_COUNT)
        .map(|id| {
            let (topic, _) = TOPICS[(id as usize * 3) % TOPICS.len()];
            let seats_total = rng.gen_range(2..=8) * 10;
            Workshop {
                id,
                title: format!("Workshop: {}", topic),
                description: format!("A live, interactive session covering {}.", topic.to_lowercase()),
                host: HOSTS[(id as usize - 1) % HOSTS.len()].to_string(),
                date: today + Duration::days(rng.gen_range(1..=60)),
                start_time: format!("{:02}:00", rng.gen_range(10..=19)),
                mode: if rng.gen_bool(0.6) { WorkshopMode::Online } else { WorkshopMode::InPerson },
                seats_total,
                seats_remaining: rng.gen_range(0..=seats_total),
            }
        })
        .collect()
}

fn generate_notifications(seed: u64, now: DateTime<Utc>) -> Vec<Notification> {
    let mut rng = derive_rng(seed, NOTIFICATION_STREAM);
    let mut hours_ago = 0i64;

    // Newest first
    (1..=NOTIFICATION_COUNT)
        .map(|id| {
            let (kind, title, description) = NOTIFICATION_TEMPLATES[(id as usize - 1) % NOTIFICATION_TEMPLATES.len()];
            hours_ago += rng.gen_range(1..=18);
            Notification {
                id,
                title: title.to_string(),
                description: description.to_string(),
                kind: kind.to_string(),
                read: rng.gen_bool(0.5),
                created_at: now - Duration::hours(hours_ago),
            }
        })
        .collect()
}
