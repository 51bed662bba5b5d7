//! Place resolution
//!
//! Turns whatever the user submitted (typed text, or a suggestion picked from
//! the autocomplete widget) into a [`LocationQuery`]. Pure transform over
//! widget state, no network access.

use domain::{GeoBounds, GeoLocation, LocationQuery};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApplicationError;
use crate::settings::ClientSettings;

/// Geometry attached to an autocomplete suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceGeometry {
    /// Resolved point
    pub location: GeoLocation,
    /// Recommended viewport for the place, if the provider supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<GeoBounds>,
}

/// A suggestion chosen from the autocomplete widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSelection {
    /// Display name
    pub name: String,
    /// Full formatted address, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    /// Geometry, absent when the widget could not resolve the place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<PlaceGeometry>,
}

impl PlaceSelection {
    /// Best free-text description of the place
    fn label(&self) -> Option<&str> {
        self.formatted_address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .or_else(|| Some(self.name.trim()).filter(|n| !n.is_empty()))
    }
}

/// Raw user input at submission time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaceInput {
    /// Text typed into the address field
    FreeText {
        /// The raw text
        text: String,
    },
    /// Suggestion picked from the autocomplete widget
    Selection(PlaceSelection),
}

impl PlaceInput {
    /// Typed text input
    #[must_use]
    pub fn free_text(text: impl Into<String>) -> Self {
        Self::FreeText { text: text.into() }
    }
}

/// Outcome of resolving a place
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
    /// Query to send to the backend
    pub query: LocationQuery,
    /// Set when a selection without geometry was downgraded to free text
    pub degraded: bool,
}

impl ResolvedPlace {
    const fn exact(query: LocationQuery) -> Self {
        Self {
            query,
            degraded: false,
        }
    }
}

/// Resolves user input into a location query
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceResolver {
    allow_text_fallback: bool,
}

impl PlaceResolver {
    /// Create a resolver
    ///
    /// With `allow_text_fallback`, selections that lack geometry are sent as
    /// free text instead of failing.
    #[must_use]
    pub const fn new(allow_text_fallback: bool) -> Self {
        Self {
            allow_text_fallback,
        }
    }

    /// Create a resolver from client settings
    #[must_use]
    pub const fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.allow_text_fallback)
    }

    /// Resolve user input into a query
    ///
    /// # Errors
    ///
    /// - `Validation` when typed text is empty after trimming
    /// - `Resolution` when a selection has no usable geometry and text
    ///   fallback is disabled (or the selection has no text either)
    pub fn resolve(&self, input: &PlaceInput) -> Result<ResolvedPlace, ApplicationError> {
        match input {
            PlaceInput::FreeText { text } => {
                let query = LocationQuery::from_address(text.as_str())?;
                debug!(%query, "Resolved typed address");
                Ok(ResolvedPlace::exact(query))
            },
            PlaceInput::Selection(selection) => self.resolve_selection(selection),
        }
    }

    fn resolve_selection(
        &self,
        selection: &PlaceSelection,
    ) -> Result<ResolvedPlace, ApplicationError> {
        let coordinates = selection
            .geometry
            .as_ref()
            .and_then(|g| g.location.validated().ok());

        if let Some(coordinates) = coordinates {
            let query = LocationQuery::new(selection.label().map(String::from), Some(coordinates))?;
            debug!(%query, "Resolved place selection");
            return Ok(ResolvedPlace::exact(query));
        }

        if !self.allow_text_fallback {
            return Err(ApplicationError::Resolution(format!(
                "no usable location for \"{}\"",
                selection.name
            )));
        }

        let Some(label) = selection.label() else {
            return Err(ApplicationError::Resolution(
                "no usable location: selection has neither geometry nor text".to_string(),
            ));
        };

        warn!(
            place = %label,
            "Selection has no geometry, falling back to free-text query"
        );
        Ok(ResolvedPlace {
            query: LocationQuery::from_address(label)?,
            degraded: true,
        })
    }
}
