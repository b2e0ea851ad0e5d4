use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::RangeInclusive;
use uuid::Uuid;

use crate::models::{City, Good, Location, Offer, OfferType};
use crate::{CoreError, CoreResult};

const TITLE_LENGTH: RangeInclusive<usize> = 10..=100;
const DESCRIPTION_LENGTH: RangeInclusive<usize> = 20..=1024;
const IMAGE_COUNT: usize = 6;
const RATING: RangeInclusive<f64> = 1.0..=5.0;
const BEDROOMS: RangeInclusive<u32> = 1..=8;
const MAX_ADULTS: RangeInclusive<u32> = 1..=10;
const PRICE: RangeInclusive<u32> = 100..=100_000;
const LATITUDE: RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE: RangeInclusive<f64> = -180.0..=180.0;

/// Payload rules checked at the HTTP boundary before a service call
pub trait Validate {
    fn validate(&self) -> CoreResult<()>;
}

/// Body of `POST /offers`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateOffer {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub post_date: Option<DateTime<Utc>>,
    pub city: City,
    pub preview_image: String,
    pub images: Vec<String>,
    pub is_premium: bool,
    pub rating: f64,
    #[serde(rename = "type")]
    pub offer_type: OfferType,
    pub bedrooms: u32,
    pub max_adults: u32,
    pub price: u32,
    pub goods: Vec<Good>,
    pub host_id: Uuid,
    pub location: Location,
}

/// Body of `PATCH /offers/{offerId}`. Absent fields are left untouched and
/// are skipped when the patch is serialized for a document merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateOffer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<City>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub offer_type: Option<OfferType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_adults: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goods: Option<Vec<Good>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl UpdateOffer {
    /// Overwrite the present fields of `offer` in place
    pub fn apply_to(&self, offer: &mut Offer, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            offer.title = title.clone();
        }
        if let Some(description) = &self.description {
            offer.description = description.clone();
        }
        if let Some(post_date) = self.post_date {
            offer.post_date = post_date;
        }
        if let Some(city) = self.city {
            offer.city = city;
        }
        if let Some(preview_image) = &self.preview_image {
            offer.preview_image = preview_image.clone();
        }
        if let Some(images) = &self.images {
            offer.images = images.clone();
        }
        if let Some(is_premium) = self.is_premium {
            offer.is_premium = is_premium;
        }
        if let Some(rating) = self.rating {
            offer.rating = rating;
        }
        if let Some(offer_type) = self.offer_type {
            offer.offer_type = offer_type;
        }
        if let Some(bedrooms) = self.bedrooms {
            offer.bedrooms = bedrooms;
        }
        if let Some(max_adults) = self.max_adults {
            offer.max_adults = max_adults;
        }
        if let Some(price) = self.price {
            offer.price = price;
        }
        if let Some(goods) = &self.goods {
            offer.goods = goods.clone();
        }
        if let Some(host_id) = self.host_id {
            offer.host_id = host_id;
        }
        if let Some(location) = self.location {
            offer.location = location;
        }
        offer.updated_at = now;
    }
}

impl Validate for CreateOffer {
    fn validate(&self) -> CoreResult<()> {
        check_title(&self.title)?;
        check_description(&self.description)?;
        check_preview_image(&self.preview_image)?;
        check_images(&self.images)?;
        check_rating(self.rating)?;
        check_range("bedrooms", self.bedrooms, BEDROOMS)?;
        check_range("maxAdults", self.max_adults, MAX_ADULTS)?;
        check_range("price", self.price, PRICE)?;
        check_goods(&self.goods)?;
        check_location(&self.location)
    }
}

impl Validate for UpdateOffer {
    fn validate(&self) -> CoreResult<()> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(description) = &self.description {
            check_description(description)?;
        }
        if let Some(preview_image) = &self.preview_image {
            check_preview_image(preview_image)?;
        }
        if let Some(images) = &self.images {
            check_images(images)?;
        }
        if let Some(rating) = self.rating {
            check_rating(rating)?;
        }
        if let Some(bedrooms) = self.bedrooms {
            check_range("bedrooms", bedrooms, BEDROOMS)?;
        }
        if let Some(max_adults) = self.max_adults {
            check_range("maxAdults", max_adults, MAX_ADULTS)?;
        }
        if let Some(price) = self.price {
            check_range("price", price, PRICE)?;
        }
        if let Some(goods) = &self.goods {
            check_goods(goods)?;
        }
        if let Some(location) = &self.location {
            check_location(location)?;
        }
        Ok(())
    }
}

fn invalid(message: String) -> CoreError {
    CoreError::ValidationError(message)
}

fn check_length(field: &str, value: &str, bounds: RangeInclusive<usize>) -> CoreResult<()> {
    let length = value.chars().count();
    if bounds.contains(&length) {
        Ok(())
    } else {
        Err(invalid(format!(
            "{} must be between {} and {} characters, got {}",
            field,
            bounds.start(),
            bounds.end(),
            length
        )))
    }
}

fn check_title(title: &str) -> CoreResult<()> {
    check_length("title", title, TITLE_LENGTH)
}

fn check_description(description: &str) -> CoreResult<()> {
    check_length("description", description, DESCRIPTION_LENGTH)
}

fn check_preview_image(preview_image: &str) -> CoreResult<()> {
    if preview_image.trim().is_empty() {
        return Err(invalid("previewImage must not be empty".to_string()));
    }
    Ok(())
}

fn check_images(images: &[String]) -> CoreResult<()> {
    if images.len() != IMAGE_COUNT {
        return Err(invalid(format!(
            "images must contain exactly {} entries, got {}",
            IMAGE_COUNT,
            images.len()
        )));
    }
    if images.iter().any(|image| image.trim().is_empty()) {
        return Err(invalid("images must not contain empty entries".to_string()));
    }
    Ok(())
}

fn check_rating(rating: f64) -> CoreResult<()> {
    if RATING.contains(&rating) {
        Ok(())
    } else {
        Err(invalid(format!(
            "rating must be between {} and {}, got {}",
            RATING.start(),
            RATING.end(),
            rating
        )))
    }
}

fn check_range(field: &str, value: u32, bounds: RangeInclusive<u32>) -> CoreResult<()> {
    if bounds.contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!(
            "{} must be between {} and {}, got {}",
            field,
            bounds.start(),
            bounds.end(),
            value
        )))
    }
}

fn check_goods(goods: &[Good]) -> CoreResult<()> {
    if goods.is_empty() {
        return Err(invalid("goods must contain at least one entry".to_string()));
    }
    let mut seen = HashSet::new();
    if !goods.iter().all(|good| seen.insert(good)) {
        return Err(invalid("goods must not contain duplicates".to_string()));
    }
    Ok(())
}

fn check_location(location: &Location) -> CoreResult<()> {
    if !LATITUDE.contains(&location.latitude) {
        return Err(invalid(format!(
            "location.latitude must be between -90 and 90, got {}",
            location.latitude
        )));
    }
    if !LONGITUDE.contains(&location.longitude) {
        return Err(invalid(format!(
            "location.longitude must be between -180 and 180, got {}",
            location.longitude
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_create(city: City, is_premium: bool) -> CreateOffer {
        CreateOffer {
            title: "Canal view loft near the old town".to_string(),
            description: "Bright two-room loft with a balcony over the canal.".to_string(),
            post_date: None,
            city,
            preview_image: "https://img.example/preview.jpg".to_string(),
            images: (1..=6).map(|i| format!("https://img.example/{}.jpg", i)).collect(),
            is_premium,
            rating: 4.2,
            offer_type: OfferType::Apartment,
            bedrooms: 2,
            max_adults: 4,
            price: 180,
            goods: vec![Good::Breakfast, Good::AirConditioning, Good::Washer],
            host_id: Uuid::new_v4(),
            location: Location { latitude: 48.85661, longitude: 2.351499 },
        }
    }

    pub(crate) fn sample_offer(city: City, is_premium: bool) -> Offer {
        Offer::new(Uuid::new_v4(), sample_create(city, is_premium), Utc::now())
    }

    fn assert_rejected(result: CoreResult<()>, field: &str) {
        match result {
            Err(CoreError::ValidationError(message)) => {
                assert!(message.contains(field), "'{}' does not name {}", message, field)
            }
            other => panic!("expected validation error for {}, got {:?}", field, other),
        }
    }

    #[test]
    fn test_valid_payload_passes() {
        assert!(sample_create(City::Paris, false).validate().is_ok());
    }

    #[test]
    fn test_each_rule_names_its_field() {
        let mut payload = sample_create(City::Paris, false);
        payload.title = "Short".to_string();
        assert_rejected(payload.validate(), "title");

        let mut payload = sample_create(City::Paris, false);
        payload.description = "Too short".to_string();
        assert_rejected(payload.validate(), "description");

        let mut payload = sample_create(City::Paris, false);
        payload.images.pop();
        assert_rejected(payload.validate(), "images");

        let mut payload = sample_create(City::Paris, false);
        payload.rating = 5.5;
        assert_rejected(payload.validate(), "rating");

        let mut payload = sample_create(City::Paris, false);
        payload.bedrooms = 9;
        assert_rejected(payload.validate(), "bedrooms");

        let mut payload = sample_create(City::Paris, false);
        payload.max_adults = 0;
        assert_rejected(payload.validate(), "maxAdults");

        let mut payload = sample_create(City::Paris, false);
        payload.price = 99;
        assert_rejected(payload.validate(), "price");

        let mut payload = sample_create(City::Paris, false);
        payload.goods = vec![Good::Fridge, Good::Fridge];
        assert_rejected(payload.validate(), "goods");

        let mut payload = sample_create(City::Paris, false);
        payload.location.longitude = 181.0;
        assert_rejected(payload.validate(), "longitude");

        let mut payload = sample_create(City::Paris, false);
        payload.preview_image = "   ".to_string();
        assert_rejected(payload.validate(), "previewImage");

        let mut payload = sample_create(City::Paris, false);
        payload.location.latitude = -90.5;
        assert_rejected(payload.validate(), "latitude");

        let mut payload = sample_create(City::Paris, false);
        payload.goods.clear();
        assert_rejected(payload.validate(), "goods must contain at least one entry");

        let mut payload = sample_create(City::Paris, false);
        payload.images[2] = " ".to_string();
        assert_rejected(payload.validate(), "images must not contain empty entries");
    }

    #[test]
    fn test_update_only_checks_present_fields() {
        assert!(UpdateOffer::default().validate().is_ok());

        let update = UpdateOffer { price: Some(250), ..Default::default() };
        assert!(update.validate().is_ok());

        let update = UpdateOffer { rating: Some(0.5), ..Default::default() };
        assert_rejected(update.validate(), "rating");
    }

    #[test]
    fn test_apply_keeps_absent_fields_and_identity() {
        let mut offer = sample_offer(City::Amsterdam, false);
        let before = offer.clone();
        let later = before.updated_at + chrono::Duration::seconds(5);

        let update = UpdateOffer {
            price: Some(320),
            is_premium: Some(true),
            ..Default::default()
        };
        update.apply_to(&mut offer, later);

        assert_eq!(offer.id, before.id);
        assert_eq!(offer.price, 320);
        assert!(offer.is_premium);
        assert_eq!(offer.title, before.title);
        assert_eq!(offer.city, before.city);
        assert_eq!(offer.created_at, before.created_at);
        assert_eq!(offer.updated_at, later);
    }

    #[test]
    fn test_update_patch_omits_absent_fields() {
        let update = UpdateOffer { city: Some(City::Brussels), ..Default::default() };
        let patch = serde_json::to_value(&update).unwrap();

        assert_eq!(patch, serde_json::json!({ "city": "Brussels" }));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let body = serde_json::json!({ "id": Uuid::new_v4(), "price": 200 });
        assert!(serde_json::from_value::<UpdateOffer>(body).is_err());
    }
}
