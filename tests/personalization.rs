use beauty_crm::personalization::locative::lookup_city;
use beauty_crm::personalization::{
    Personalization, decline_city_to_locative, decline_name_to_vocative, format_phone_number,
    personalize,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn nine_digit_numbers_are_grouped(national in "[0-9]{9}") {
        let expected = format!(
            "+48 {} {} {}",
            &national[0..3],
            &national[3..6],
            &national[6..9]
        );
        prop_assert_eq!(format_phone_number(&national), expected.clone());
        prop_assert_eq!(format_phone_number(&format!("+48{national}")), expected);
    }

    #[test]
    fn text_without_placeholders_is_untouched(text in "[^{]*") {
        let ctx = Personalization::new(Some("Anna"), Some("Kraków"), None, None);
        prop_assert_eq!(personalize(&text, &ctx), text);
    }

    #[test]
    fn multi_word_city_keeps_leading_words(
        head in "[A-ZŁŚŻ][a-ząęółśżźćń]{2,8}",
        last in "[A-ZŁŚŻ][a-ząęółśżźćń]{2,8}",
    ) {
        let phrase = format!("{head} {last}");
        prop_assume!(lookup_city(&phrase).is_none());
        let declined = decline_city_to_locative(&phrase);
        let prefix = format!("{head} ");
        prop_assert!(declined.starts_with(&prefix));
    }

    #[test]
    fn declension_never_panics(input in "\\PC{0,24}") {
        let _ = decline_name_to_vocative(&input);
        let _ = decline_city_to_locative(&input);
    }
}

#[test]
fn empty_inputs_stay_empty() {
    assert_eq!(decline_name_to_vocative(""), "");
    assert_eq!(decline_city_to_locative(""), "");
}
