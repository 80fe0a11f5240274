//! Builds the per-location URL an idle reset navigates to.

use url::Url;

pub const LOCATION_PLACEHOLDER: &str = "{location}";

/// Turns a location slug into an absolute reset URL.
///
/// `{location}` in the template is replaced by the slug, the result is
/// joined onto the base URL, and `<marker>=true` is appended to the query.
#[derive(Debug, Clone)]
pub struct TargetUrlBuilder {
    base: Url,
    template: String,
    marker: String,
}

impl TargetUrlBuilder {
    pub fn new(base: Url, template: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            base,
            template: template.into(),
            marker: marker.into(),
        }
    }

    pub fn build(&self, location_slug: &str) -> Result<Url, url::ParseError> {
        let path = self.template.replace(LOCATION_PLACEHOLDER, location_slug);
        let mut url = self.base.join(&path)?;
        url.query_pairs_mut().append_pair(&self.marker, "true");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(template: &str) -> TargetUrlBuilder {
        let base = Url::parse("http://kiosk.local:5000/").unwrap();
        TargetUrlBuilder::new(base, template, "timeout")
    }

    #[test]
    fn test_build_default_template() {
        let url = builder("/location/{location}/set/{location}")
            .build("park1")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://kiosk.local:5000/location/park1/set/park1?timeout=true"
        );
    }

    #[test]
    fn test_build_keeps_template_query() {
        let url = builder("/location/{location}/home?lang=en").build("zoo2").unwrap();
        assert_eq!(url.path(), "/location/zoo2/home");
        assert_eq!(url.query(), Some("lang=en&timeout=true"));
    }

    #[test]
    fn test_build_encodes_slug() {
        let url = builder("/location/{location}").build("north gate").unwrap();
        assert_eq!(url.path(), "/location/north%20gate");
    }

    #[test]
    fn test_build_empty_slug() {
        let url = builder("/location/{location}/set/{location}").build("").unwrap();
        assert_eq!(url.path(), "/location//set/");
    }
}
