//! The add-marker form and its validation rules.

use crate::geo::LatLng;
use thiserror::Error;

/// Field of [`MarkerForm`] an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Label,
    Lat,
    Lng,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Label is required")]
    LabelRequired,
    #[error("Latitude is required")]
    LatRequired,
    #[error("Latitude must be a number")]
    LatInvalid,
    #[error("Latitude must be between -90 and 90")]
    LatRange,
    #[error("Longitude is required")]
    LngRequired,
    #[error("Longitude must be a number")]
    LngInvalid,
    #[error("Longitude must be between -180 and 180")]
    LngRange,
}

impl FormError {
    pub fn field(&self) -> FormField {
        match self {
            FormError::LabelRequired => FormField::Label,
            FormError::LatRequired | FormError::LatInvalid | FormError::LatRange => FormField::Lat,
            FormError::LngRequired | FormError::LngInvalid | FormError::LngRange => FormField::Lng,
        }
    }
}

/// A validated form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMarker {
    pub position: LatLng,
    pub label: String,
}

/// Raw text of the add-marker form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerForm {
    pub label: String,
    pub lat: String,
    pub lng: String,
}

impl MarkerForm {
    /// Validates all fields, collecting every error.
    pub fn validate(&self) -> Result<NewMarker, Vec<FormError>> {
        let mut errors = Vec::new();

        let label = self.label.trim();
        if label.is_empty() {
            errors.push(FormError::LabelRequired);
        }

        let lat = parse_coordinate(
            &self.lat,
            90.0,
            [FormError::LatRequired, FormError::LatInvalid, FormError::LatRange],
        );
        let lng = parse_coordinate(
            &self.lng,
            180.0,
            [FormError::LngRequired, FormError::LngInvalid, FormError::LngRange],
        );

        match (lat, lng) {
            (Ok(lat), Ok(lng)) if errors.is_empty() => Ok(NewMarker {
                position: LatLng::new(lat, lng),
                label: label.to_owned(),
            }),
            (lat, lng) => {
                errors.extend(lat.err());
                errors.extend(lng.err());
                Err(errors)
            }
        }
    }

    /// Fills both coordinate fields from a map click.
    pub fn fill_from_click(&mut self, lat_lng: LatLng) {
        self.lat = format!("{:.6}", lat_lng.lat);
        self.lng = format!("{:.6}", lat_lng.lng);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// `errors` is `[required, invalid, out of range]` for the field being parsed.
fn parse_coordinate(raw: &str, limit: f64, errors: [FormError; 3]) -> Result<f64, FormError> {
    let [required, invalid, range] = errors;
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(required);
    }
    let value: f64 = raw.parse().map_err(|_| invalid)?;
    if !value.is_finite() {
        return Err(invalid);
    }
    if !(-limit..=limit).contains(&value) {
        return Err(range);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(label: &str, lat: &str, lng: &str) -> MarkerForm {
        MarkerForm {
            label: label.to_string(),
            lat: lat.to_string(),
            lng: lng.to_string(),
        }
    }

    #[test]
    fn test_valid_form_trims_values() {
        let marker = form("  Praha  ", " 50.087 ", "14.421").validate().unwrap();
        assert_eq!(marker.label, "Praha");
        assert_eq!(marker.position, LatLng::new(50.087, 14.421));
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = MarkerForm::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                FormError::LabelRequired,
                FormError::LatRequired,
                FormError::LngRequired
            ]
        );
    }

    #[test]
    fn test_non_numeric_coordinates() {
        let errors = form("x", "north", "14,4").validate().unwrap_err();
        assert_eq!(errors, vec![FormError::LatInvalid, FormError::LngInvalid]);

        let errors = form("x", "NaN", "inf").validate().unwrap_err();
        assert_eq!(errors, vec![FormError::LatInvalid, FormError::LngInvalid]);
    }

    #[test]
    fn test_range_limits_are_inclusive() {
        assert!(form("pole", "90", "180").validate().is_ok());
        assert!(form("pole", "-90", "-180").validate().is_ok());

        let errors = form("x", "90.5", "-180.1").validate().unwrap_err();
        assert_eq!(errors, vec![FormError::LatRange, FormError::LngRange]);
    }

    #[test]
    fn test_error_fields() {
        assert_eq!(FormError::LabelRequired.field(), FormField::Label);
        assert_eq!(FormError::LatRange.field(), FormField::Lat);
        assert_eq!(FormError::LngInvalid.field(), FormField::Lng);
    }

    #[test]
    fn test_fill_from_click_uses_six_decimals() {
        let mut form = form("keep", "", "");
        form.fill_from_click(LatLng::new(50.0870123456, -14.4));
        assert_eq!(form.lat, "50.087012");
        assert_eq!(form.lng, "-14.400000");
        assert_eq!(form.label, "keep");

        form.reset();
        assert_eq!(form, MarkerForm::default());
    }
}
