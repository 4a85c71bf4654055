//! First names in the vocative case (wołacz), used in greetings.

use crate::personalization::rules::{RuleSet, SuffixRule};

/// Common female names whose vocative does not follow [`FEMININE_NAME`].
pub const NAME_VOCATIVES: &[(&str, &str)] = &[
    ("Anna", "Anno"),
    ("Maria", "Mario"),
    ("Katarzyna", "Katarzyno"),
    ("Małgorzata", "Małgorzato"),
    ("Agnieszka", "Agnieszko"),
    ("Barbara", "Barbaro"),
    ("Ewa", "Ewo"),
    ("Krystyna", "Krystyno"),
    ("Elżbieta", "Elżbieto"),
    ("Joanna", "Joanno"),
    ("Magdalena", "Magdaleno"),
    ("Monika", "Moniko"),
    ("Aleksandra", "Aleksandro"),
    ("Natalia", "Natalio"),
    ("Julia", "Julio"),
    ("Zofia", "Zofio"),
    ("Wiktoria", "Wiktorio"),
    ("Emilia", "Emilio"),
    ("Karolina", "Karolino"),
    ("Paulina", "Paulino"),
    ("Justyna", "Justyno"),
    ("Dorota", "Doroto"),
    ("Beata", "Beato"),
    ("Jolanta", "Jolanto"),
    ("Iwona", "Iwono"),
    ("Renata", "Renato"),
    ("Sylwia", "Sylwio"),
    ("Patrycja", "Patrycjo"),
    ("Klaudia", "Klaudio"),
    ("Kinga", "Kingo"),
    ("Dominika", "Dominiko"),
    ("Marta", "Marto"),
    ("Martyna", "Martyno"),
    ("Weronika", "Weroniko"),
    ("Gabriela", "Gabrielo"),
    ("Oliwia", "Oliwio"),
    ("Amelia", "Amelio"),
    ("Lena", "Leno"),
    ("Hanna", "Hanno"),
    ("Alicja", "Alicjo"),
    ("Kamila", "Kamilo"),
    ("Izabela", "Izabelo"),
    ("Edyta", "Edyto"),
    ("Urszula", "Urszulo"),
    ("Marzena", "Marzeno"),
    ("Ola", "Olu"),
    ("Ela", "Elu"),
    ("Ula", "Ulu"),
];

/// Fallback for names ending in `-a`. Other endings are left in the nominative.
pub const FEMININE_NAME: RuleSet = RuleSet::new(
    "feminine name",
    &[
        SuffixRule::replace("ka", "ko"),
        SuffixRule::replace("ia", "iu"),
        SuffixRule::replace("ja", "iu"),
        SuffixRule::replace("a", "o"),
    ],
);

pub fn lookup_name(name: &str) -> Option<&'static str> {
    NAME_VOCATIVES
        .iter()
        .find(|(nominative, _)| *nominative == name)
        .map(|(_, vocative)| *vocative)
}

/// Declines a Polish first name into the vocative case.
///
/// Masculine names (anything not ending in `-a`) come back unchanged, the
/// nominative standing in for the vocative.
pub fn decline_name_to_vocative(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return String::new();
    }

    if let Some(known) = lookup_name(name) {
        return known.to_string();
    }

    FEMININE_NAME
        .apply(name)
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_names() {
        assert_eq!(decline_name_to_vocative("Anna"), "Anno");
        assert_eq!(decline_name_to_vocative("Maria"), "Mario");
        assert_eq!(decline_name_to_vocative("Ola"), "Olu");
        for (nominative, vocative) in NAME_VOCATIVES {
            assert_eq!(decline_name_to_vocative(nominative), *vocative);
        }
    }

    #[test]
    fn rule_based_names() {
        assert_eq!(decline_name_to_vocative("Kasia"), "Kasiu");
        assert_eq!(decline_name_to_vocative("Maja"), "Maiu");
        assert_eq!(decline_name_to_vocative("Danuta"), "Danuto");
        assert_eq!(decline_name_to_vocative("Bożenka"), "Bożenko");
        assert_eq!(decline_name_to_vocative(" Gosia "), "Gosiu");
    }

    #[test]
    fn masculine_names_are_unchanged() {
        assert_eq!(decline_name_to_vocative("Tomasz"), "Tomasz");
        assert_eq!(decline_name_to_vocative("Piotr"), "Piotr");
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(decline_name_to_vocative(""), "");
        assert_eq!(decline_name_to_vocative("  "), "");
    }
}
