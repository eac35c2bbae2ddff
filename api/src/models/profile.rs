use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Profile document kept per user in the profile store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDocument {
    pub name: String,
    /// Download URL of the profile photo, empty when none was uploaded.
    pub image: String,
    pub phone: String,
    pub location: String,
    pub birthday: Option<NaiveDate>,
    pub age: Option<u32>,
}

/// Partial write merged into a stored document. `None` leaves a field as is;
/// `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub birthday: Option<Option<NaiveDate>>,
    pub age: Option<Option<u32>>,
}

impl ProfilePatch {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            image: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn apply(self, doc: &mut ProfileDocument) {
        if let Some(name) = self.name {
            doc.name = name;
        }
        if let Some(image) = self.image {
            doc.image = image;
        }
        if let Some(phone) = self.phone {
            doc.phone = phone;
        }
        if let Some(location) = self.location {
            doc.location = location;
        }
        if let Some(birthday) = self.birthday {
            doc.birthday = birthday;
        }
        if let Some(age) = self.age {
            doc.age = age;
        }
    }
}

/// Body of a profile save. Name, phone and location are required; a save
/// writes every field, so omitted birthday or age clears the stored value.
#[derive(Debug, Clone, Validate, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    #[validate(length(max = 50, message = "Name must be at most 50 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: String,
    pub birthday: Option<NaiveDate>,
    #[validate(range(max = 150, message = "Age must be at most 150"))]
    pub age: Option<u32>,
}

impl ProfileUpdate {
    pub fn missing_required(&self) -> bool {
        self.name.is_empty() || self.phone.is_empty() || self.location.is_empty()
    }
}

impl From<ProfileUpdate> for ProfilePatch {
    fn from(update: ProfileUpdate) -> Self {
        Self {
            name: Some(update.name),
            image: None,
            phone: Some(update.phone),
            location: Some(update.location),
            birthday: Some(update.birthday),
            age: Some(update.age),
        }
    }
}
