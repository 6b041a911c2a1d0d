use tracing::debug;

use shared_models::response::Page;
use shared_utils::pagination::ListingQuery;

use crate::models::{Expert, ExpertError, ExpertType};

const ROSTER: [(&str, &str, ExpertType, &str); 10] = [
    ("Sarah Al-Mansouri", "Family Law", ExpertType::Legal, "English,Arabic"),
    ("Omar Haddad", "Corporate Law", ExpertType::Legal, "English,French"),
    ("Layla Rahman", "Immigration Law", ExpertType::Legal, "English,Urdu"),
    ("Yusuf Karim", "Real Estate Law", ExpertType::Legal, "English,Malay"),
    ("Noor Siddiqui", "Employment Law", ExpertType::Legal, "English"),
    ("Sheikh Ibrahim Qureshi", "Islamic Finance", ExpertType::Shariah, "Arabic,English"),
    ("Aisha Bakr", "Inheritance and Estates", ExpertType::Shariah, "Arabic,English"),
    ("Hamza Yilmaz", "Marriage and Family Fiqh", ExpertType::Shariah, "Turkish,English"),
    ("Maryam Osman", "Zakat and Charitable Giving", ExpertType::Shariah, "Somali,English"),
    ("Bilal Chaudhry", "Halal Business Compliance", ExpertType::Shariah, "Urdu,English"),
];

/// Read-only roster of experts, in the order listings return them.
#[derive(Debug, Clone)]
pub struct ExpertDirectory {
    experts: Vec<Expert>,
}

impl ExpertDirectory {
    pub fn new(experts: Vec<Expert>) -> Self {
        Self { experts }
    }

    /// Ten experts, ids 1..=10, the five legal experts first.
    pub fn with_default_roster() -> Self {
        let experts = ROSTER
            .iter()
            .enumerate()
            .map(|(index, (name, specialization, expert_type, languages))| {
                let id = index as u64 + 1;
                Expert {
                    id,
                    name: name.to_string(),
                    specialization: specialization.to_string(),
                    rate: 100 + 15 * id as u32,
                    expert_type: *expert_type,
                    image: format!("https://images.consult-mock.app/experts/{}.jpg", id),
                    bio: format!("{} advises clients on {}.", name, specialization.to_lowercase()),
                    languages: languages.split(',').map(str::to_string).collect(),
                }
            })
            .collect();

        Self::new(experts)
    }

    pub fn all(&self) -> &[Expert] {
        &self.experts
    }

    pub fn find(&self, expert_id: u64) -> Result<&Expert, ExpertError> {
        self.experts
            .iter()
            .find(|expert| expert.id == expert_id)
            .ok_or(ExpertError::NotFound)
    }

    /// Optional exact type filter, then the usual search and page slicing.
    pub fn list(&self, expert_type: Option<&str>, query: &ListingQuery) -> Result<Page<Expert>, ExpertError> {
        let expert_type = match expert_type.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => Some(raw.parse::<ExpertType>()?),
            None => None,
        };

        debug!("Listing experts type={:?} query={:?}", expert_type, query);

        let filtered = self
            .experts
            .iter()
            .filter(|expert| expert_type.map_or(true, |wanted| expert.expert_type == wanted));

        Ok(query.apply(filtered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn roster_has_five_of_each_type() {
        let directory = ExpertDirectory::with_default_roster();
        assert_eq!(directory.all().len(), 10);
        let legal = directory.all().iter().filter(|e| e.expert_type == ExpertType::Legal).count();
        assert_eq!(legal, 5);
    }

    #[test]
    fn second_page_of_legal_experts() {
        let directory = ExpertDirectory::with_default_roster();
        let page = directory
            .list(Some("legal"), &ListingQuery::new("", 2, 3))
            .unwrap();

        assert_eq!(page.total, 5);
        let ids: Vec<u64> = page.items.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 5]);
    }

    #[test]
    fn type_filter_is_case_insensitive_and_validated() {
        let directory = ExpertDirectory::with_default_roster();
        let page = directory.list(Some("SHARIAH"), &ListingQuery::default()).unwrap();
        assert!(page.items.iter().all(|e| e.expert_type == ExpertType::Shariah));
        assert_matches!(
            directory.list(Some("medical"), &ListingQuery::default()),
            Err(ExpertError::InvalidType(_))
        );
    }

    #[test]
    fn search_matches_specialization() {
        let directory = ExpertDirectory::with_default_roster();
        let page = directory.list(None, &ListingQuery::new("finance", 1, 10)).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Sheikh Ibrahim Qureshi");
    }

    #[test]
    fn unknown_expert_is_not_found() {
        let directory = ExpertDirectory::with_default_roster();
        assert_matches!(directory.find(11), Err(ExpertError::NotFound));
        assert_eq!(directory.find(1).unwrap().name, "Sarah Al-Mansouri");
    }
}
