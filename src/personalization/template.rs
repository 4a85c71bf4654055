//! Placeholder substitution for outreach message templates.

use crate::personalization::{
    decline_city_to_locative, decline_name_to_vocative, format_phone_number,
};

/// Raw values available to a template. Declension happens at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Personalization {
    pub first_name: Option<String>,
    pub city: Option<String>,
    pub salon: Option<String>,
    pub phone: Option<String>,
}

impl Personalization {
    /// Builds the context from a full contact name, keeping only the first word.
    pub fn new(
        contact_name: Option<&str>,
        city: Option<&str>,
        salon: Option<&str>,
        phone: Option<&str>,
    ) -> Self {
        Self {
            first_name: contact_name
                .and_then(|name| name.split_whitespace().next())
                .map(str::to_string),
            city: city.map(str::to_string),
            salon: salon.map(str::to_string),
            phone: phone.map(str::to_string),
        }
    }

    /// Resolves a placeholder key. `None` means the key is unknown.
    pub fn resolve(&self, key: &str) -> Option<String> {
        let value = |field: &Option<String>| field.clone().unwrap_or_default();
        match key {
            "imie" => Some(decline_name_to_vocative(
                self.first_name.as_deref().unwrap_or(""),
            )),
            "imie_mianownik" => Some(value(&self.first_name)),
            "miasto" => Some(decline_city_to_locative(
                self.city.as_deref().unwrap_or(""),
            )),
            "miasto_mianownik" => Some(value(&self.city)),
            "salon" => Some(value(&self.salon)),
            "telefon" => Some(
                self.phone
                    .as_deref()
                    .map(format_phone_number)
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }
}

/// Replaces every `{{ key }}` in `template` with its personalized value.
///
/// Unknown keys and unterminated braces are copied through untouched.
pub fn personalize(template: &str, ctx: &Personalization) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = after_open[..end].trim();
        match ctx.resolve(key) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Personalization {
        Personalization::new(
            Some("Anna Kowalska"),
            Some("Kraków"),
            Some("Studio Urody Bella"),
            Some("600700800"),
        )
    }

    #[test]
    fn substitutes_declined_values() {
        let rendered = personalize(
            "Dzień dobry {{imie}}! Widzimy, że {{ salon }} działa w {{miasto}}.",
            &ctx(),
        );
        assert_eq!(
            rendered,
            "Dzień dobry Anno! Widzimy, że Studio Urody Bella działa w Krakowie."
        );
    }

    #[test]
    fn nominative_and_phone_placeholders() {
        let rendered = personalize(
            "{{imie_mianownik}} / {{miasto_mianownik}} / {{telefon}}",
            &ctx(),
        );
        assert_eq!(rendered, "Anna / Kraków / +48 600 700 800");
    }

    #[test]
    fn unknown_placeholders_are_kept() {
        let rendered = personalize("Hej {{nieznane}} {{imie}}", &ctx());
        assert_eq!(rendered, "Hej {{nieznane}} Anno");
    }

    #[test]
    fn unterminated_placeholder_is_copied() {
        let rendered = personalize("Hej {{imie", &ctx());
        assert_eq!(rendered, "Hej {{imie");
    }

    #[test]
    fn missing_values_render_empty() {
        let rendered = personalize("[{{imie}}][{{miasto}}][{{telefon}}]", &Personalization::default());
        assert_eq!(rendered, "[][][]");
    }
}
