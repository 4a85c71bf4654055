//! City names in the locative case (miejscownik), used in "w {miasto}" phrases.

use crate::personalization::rules::{RuleSet, SuffixRule};

/// Known locatives returned verbatim. Matched against the whole trimmed phrase.
pub const CITY_LOCATIVES: &[(&str, &str)] = &[
    ("Warszawa", "Warszawie"),
    ("Kraków", "Krakowie"),
    ("Łódź", "Łodzi"),
    ("Wrocław", "Wrocławiu"),
    ("Poznań", "Poznaniu"),
    ("Gdańsk", "Gdańsku"),
    ("Szczecin", "Szczecinie"),
    ("Bydgoszcz", "Bydgoszczy"),
    ("Lublin", "Lublinie"),
    ("Białystok", "Białymstoku"),
    ("Katowice", "Katowicach"),
    ("Gdynia", "Gdyni"),
    ("Częstochowa", "Częstochowie"),
    ("Radom", "Radomiu"),
    ("Toruń", "Toruniu"),
    ("Sosnowiec", "Sosnowcu"),
    ("Rzeszów", "Rzeszowie"),
    ("Kielce", "Kielcach"),
    ("Gliwice", "Gliwicach"),
    ("Olsztyn", "Olsztynie"),
    ("Zabrze", "Zabrzu"),
    ("Bielsko-Biała", "Bielsku-Białej"),
    ("Bytom", "Bytomiu"),
    ("Zielona Góra", "Zielonej Górze"),
    ("Rybnik", "Rybniku"),
    ("Ruda Śląska", "Rudzie Śląskiej"),
    ("Opole", "Opolu"),
    ("Tychy", "Tychach"),
    ("Gorzów Wielkopolski", "Gorzowie Wielkopolskim"),
    ("Elbląg", "Elblągu"),
    ("Płock", "Płocku"),
    ("Dąbrowa Górnicza", "Dąbrowie Górniczej"),
    ("Wałbrzych", "Wałbrzychu"),
    ("Włocławek", "Włocławku"),
    ("Tarnów", "Tarnowie"),
    ("Chorzów", "Chorzowie"),
    ("Koszalin", "Koszalinie"),
    ("Kalisz", "Kaliszu"),
    ("Legnica", "Legnicy"),
    ("Grudziądz", "Grudziądzu"),
    ("Jaworzno", "Jaworznie"),
    ("Słupsk", "Słupsku"),
    ("Jastrzębie-Zdrój", "Jastrzębiu-Zdroju"),
    ("Nowy Sącz", "Nowym Sączu"),
    ("Jelenia Góra", "Jeleniej Górze"),
    ("Siedlce", "Siedlcach"),
    ("Mysłowice", "Mysłowicach"),
    ("Konin", "Koninie"),
    ("Piła", "Pile"),
    ("Piotrków Trybunalski", "Piotrkowie Trybunalskim"),
    ("Inowrocław", "Inowrocławiu"),
    ("Lubin", "Lubinie"),
    ("Ostrów Wielkopolski", "Ostrowie Wielkopolskim"),
    ("Suwałki", "Suwałkach"),
    ("Stargard", "Stargardzie"),
    ("Gniezno", "Gnieźnie"),
    ("Ostrowiec Świętokrzyski", "Ostrowcu Świętokrzyskim"),
    ("Siemianowice Śląskie", "Siemianowicach Śląskich"),
    ("Głogów", "Głogowie"),
    ("Pabianice", "Pabianicach"),
    ("Leszno", "Lesznie"),
    ("Żory", "Żorach"),
    ("Zamość", "Zamościu"),
    ("Pruszków", "Pruszkowie"),
    ("Łomża", "Łomży"),
    ("Ełk", "Ełku"),
    ("Tomaszów Mazowiecki", "Tomaszowie Mazowieckim"),
    ("Chełm", "Chełmie"),
    ("Mielec", "Mielcu"),
    ("Kędzierzyn-Koźle", "Kędzierzynie-Koźlu"),
    ("Przemyśl", "Przemyślu"),
    ("Stalowa Wola", "Stalowej Woli"),
    ("Tczew", "Tczewie"),
    ("Biała Podlaska", "Białej Podlaskiej"),
    ("Bełchatów", "Bełchatowie"),
    ("Świdnica", "Świdnicy"),
    ("Będzin", "Będzinie"),
    ("Zgierz", "Zgierzu"),
    ("Piekary Śląskie", "Piekarach Śląskich"),
    ("Racibórz", "Raciborzu"),
    ("Legionowo", "Legionowie"),
    ("Ostrołęka", "Ostrołęce"),
    ("Świętochłowice", "Świętochłowicach"),
    ("Wejherowo", "Wejherowie"),
    ("Zawiercie", "Zawierciu"),
    ("Starachowice", "Starachowicach"),
    ("Skierniewice", "Skierniewicach"),
    ("Puławy", "Puławach"),
    ("Wodzisław Śląski", "Wodzisławiu Śląskim"),
    ("Starogard Gdański", "Starogardzie Gdańskim"),
    ("Tarnobrzeg", "Tarnobrzegu"),
    ("Rumia", "Rumi"),
    ("Kołobrzeg", "Kołobrzegu"),
    ("Krosno", "Krośnie"),
    ("Otwock", "Otwocku"),
    ("Dębica", "Dębicy"),
    ("Sopot", "Sopocie"),
    ("Zakopane", "Zakopanem"),
    ("Nowy Targ", "Nowym Targu"),
    ("Świnoujście", "Świnoujściu"),
    ("Malbork", "Malborku"),
    ("Oświęcim", "Oświęcimiu"),
    ("Sanok", "Sanoku"),
    ("Jarosław", "Jarosławiu"),
    ("Ciechanów", "Ciechanowie"),
    ("Żyrardów", "Żyrardowie"),
    ("Kutno", "Kutnie"),
    ("Sieradz", "Sieradzu"),
    ("Mińsk Mazowiecki", "Mińsku Mazowieckim"),
    ("Augustów", "Augustowie"),
    ("Giżycko", "Giżycku"),
    ("Mrągowo", "Mrągowie"),
    ("Kętrzyn", "Kętrzynie"),
    ("Bochnia", "Bochni"),
    ("Wieliczka", "Wieliczce"),
    ("Skawina", "Skawinie"),
    ("Myślenice", "Myślenicach"),
    ("Wadowice", "Wadowicach"),
    ("Andrychów", "Andrychowie"),
    ("Cieszyn", "Cieszynie"),
    ("Żywiec", "Żywcu"),
    ("Gorlice", "Gorlicach"),
    ("Jasło", "Jaśle"),
    ("Łowicz", "Łowiczu"),
    ("Radomsko", "Radomsku"),
    ("Kłodzko", "Kłodzku"),
    ("Bolesławiec", "Bolesławcu"),
    ("Zgorzelec", "Zgorzelcu"),
    ("Lubliniec", "Lublińcu"),
    ("Tarnowskie Góry", "Tarnowskich Górach"),
    ("Czechowice-Dziedzice", "Czechowicach-Dziedzicach"),
    ("Piaseczno", "Piasecznie"),
    ("Grodzisk Mazowiecki", "Grodzisku Mazowieckim"),
    ("Marki", "Markach"),
    ("Ząbki", "Ząbkach"),
    ("Wołomin", "Wołominie"),
    ("Łomianki", "Łomiankach"),
    ("Konstancin-Jeziorna", "Konstancinie-Jeziornie"),
    ("Józefów", "Józefowie"),
    ("Sulejówek", "Sulejówku"),
    ("Nowy Dwór Mazowiecki", "Nowym Dworze Mazowieckim"),
    ("Płońsk", "Płońsku"),
    ("Sochaczew", "Sochaczewie"),
    ("Łuków", "Łukowie"),
    ("Hrubieszów", "Hrubieszowie"),
    ("Kraśnik", "Kraśniku"),
    ("Świdnik", "Świdniku"),
    ("Sandomierz", "Sandomierzu"),
    ("Busko-Zdrój", "Busku-Zdroju"),
    ("Ciechocinek", "Ciechocinku"),
    ("Ustka", "Ustce"),
    ("Władysławowo", "Władysławowie"),
    ("Hel", "Helu"),
    ("Jastarnia", "Jastarni"),
    ("Międzyzdroje", "Międzyzdrojach"),
    ("Szklarska Poręba", "Szklarskiej Porębie"),
    ("Karpacz", "Karpaczu"),
    ("Krynica-Zdrój", "Krynicy-Zdroju"),
];

/// `-a` endings, treated as feminine.
pub const FEMININE_A: RuleSet = RuleSet::new(
    "feminine -a",
    &[
        SuffixRule::replace("ka", "ce"),
        SuffixRule::replace("ga", "dze"),
        SuffixRule::replace("owa", "owej"),
        SuffixRule::replace("ia", "i"),
        SuffixRule::replace("ja", "i"),
        SuffixRule::replace("a", "ie"),
    ],
);

/// `-o` endings, treated as neuter.
pub const NEUTER_O: RuleSet = RuleSet::new(
    "neuter -o",
    &[
        SuffixRule::replace("no", "nie"),
        SuffixRule::replace("wo", "wie"),
        SuffixRule::replace("o", "ie"),
    ],
);

/// `-e` endings, treated as neuter. Anything else ending in `-e` stays as is.
pub const NEUTER_E: RuleSet = RuleSet::new(
    "neuter -e",
    &[
        SuffixRule::replace("ie", "iu"),
        SuffixRule::replace("ce", "cu"),
    ],
);

/// Consonant endings, treated as masculine. Longer suffixes come first.
pub const MASCULINE: RuleSet = RuleSet::new(
    "masculine",
    &[
        SuffixRule::replace("ów", "owie"),
        SuffixRule::append("ew", "ie"),
        SuffixRule::append("aw", "ie"),
        SuffixRule::append("in", "ie"),
        SuffixRule::append("yn", "ie"),
        // `ań` and `eń` rewrite exactly like `ń`; listed to mirror the suffix table.
        SuffixRule::rewrite("ań", 1, "niu"),
        SuffixRule::rewrite("eń", 1, "niu"),
        SuffixRule::rewrite("ń", 1, "niu"),
        SuffixRule::rewrite("ść", 1, "ciu"),
        SuffixRule::rewrite("dź", 1, "ziu"),
        SuffixRule::append("sk", "u"),
        SuffixRule::append("ck", "u"),
        SuffixRule::append("k", "u"),
        // mobile vowel: Żywiec -> Żywcu, Mielec -> Mielcu
        SuffixRule::replace("iec", "cu"),
        SuffixRule::replace("ec", "cu"),
        SuffixRule::append("c", "u"),
        SuffixRule::append("ż", "u"),
        SuffixRule::append("sz", "u"),
        SuffixRule::append("cz", "u"),
        SuffixRule::append("rz", "u"),
        SuffixRule::append("ch", "u"),
        SuffixRule::append("g", "u"),
        SuffixRule::append("ł", "e"),
        SuffixRule::replace("t", "cie"),
        SuffixRule::replace("d", "dzie"),
        SuffixRule::append("m", "iu"),
        SuffixRule::append("l", "u"),
    ],
);

/// Ending appended when no masculine rule matches.
pub const DEFAULT_ENDING: &str = "ie";

/// Looks a whole city phrase up in [`CITY_LOCATIVES`].
pub fn lookup_city(city: &str) -> Option<&'static str> {
    CITY_LOCATIVES
        .iter()
        .find(|(nominative, _)| *nominative == city)
        .map(|(_, locative)| *locative)
}

/// Picks the rule table responsible for the final letter of `word`.
pub fn ruleset_for(word: &str) -> RuleSet {
    match word.chars().last() {
        Some('a') => FEMININE_A,
        Some('o') => NEUTER_O,
        Some('e') => NEUTER_E,
        _ => MASCULINE,
    }
}

/// The rule that would fire for a single `word`, if any.
pub fn locative_rule_for(word: &str) -> Option<&'static SuffixRule> {
    ruleset_for(word).matching(word)
}

fn decline_word(word: &str) -> String {
    let rules = ruleset_for(word);
    if let Some(declined) = rules.apply(word) {
        return declined;
    }
    if word.ends_with('e') {
        return word.to_string();
    }
    format!("{word}{DEFAULT_ENDING}")
}

/// Declines a Polish city name into the locative case.
///
/// Dictionary entries win. Otherwise only the last space-separated word is
/// rewritten by the suffix rules and the preceding words are kept as given.
/// Empty input yields an empty string.
pub fn decline_city_to_locative(city: &str) -> String {
    let city = city.trim();
    if city.is_empty() {
        return String::new();
    }

    if let Some(known) = lookup_city(city) {
        return known.to_string();
    }

    match city.rsplit_once(' ') {
        Some((head, last)) => format!("{head} {}", decline_word(last)),
        None => decline_word(city),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_hits_are_returned_verbatim() {
        assert_eq!(decline_city_to_locative("Warszawa"), "Warszawie");
        assert_eq!(decline_city_to_locative("Kraków"), "Krakowie");
        assert_eq!(decline_city_to_locative("Łódź"), "Łodzi");
        assert_eq!(decline_city_to_locative("Zielona Góra"), "Zielonej Górze");
        assert_eq!(decline_city_to_locative("  Gdynia "), "Gdyni");
    }

    #[test]
    fn every_dictionary_key_maps_to_its_value() {
        for (nominative, locative) in CITY_LOCATIVES {
            assert_eq!(decline_city_to_locative(nominative), *locative);
        }
    }

    #[test]
    fn dictionary_has_no_duplicate_keys() {
        let mut keys: Vec<&str> = CITY_LOCATIVES.iter().map(|(k, _)| *k).collect();
        keys.sort_unstable();
        let before = keys.len();
        keys.dedup();
        assert_eq!(before, keys.len());
        assert!(before >= 150);
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(decline_city_to_locative(""), "");
        assert_eq!(decline_city_to_locative("   "), "");
    }

    #[test]
    fn feminine_rules() {
        assert_eq!(decline_city_to_locative("Polanka"), "Polance");
        assert_eq!(decline_city_to_locative("Wolbroga"), "Wolbrodze");
        assert_eq!(decline_city_to_locative("Grabowa"), "Grabowej");
        assert_eq!(decline_city_to_locative("Kolonia"), "Koloni");
        assert_eq!(decline_city_to_locative("Zawoja"), "Zawoi");
        assert_eq!(decline_city_to_locative("Ostroda"), "Ostrodie");
    }

    #[test]
    fn neuter_rules() {
        assert_eq!(decline_city_to_locative("Rypino"), "Rypinie");
        assert_eq!(decline_city_to_locative("Pruszkowo"), "Pruszkowie");
        assert_eq!(decline_city_to_locative("Brzesko"), "Brzeskie");
        assert_eq!(decline_city_to_locative("Podgórzyce"), "Podgórzycu");
        assert_eq!(decline_city_to_locative("Brzezie"), "Brzeziu");
        assert_eq!(decline_city_to_locative("Końskie"), "Końskiu");
        assert_eq!(decline_city_to_locative("Chrzanowe"), "Chrzanowe");
    }

    #[test]
    fn masculine_rules() {
        let cases = [
            ("Dębów", "Dębowie"),
            ("Radziejew", "Radziejewie"),
            ("Stanisław", "Stanisławie"),
            ("Gostyn", "Gostynie"),
            ("Brwin", "Brwinie"),
            ("Gorzań", "Gorzaniu"),
            ("Kamień", "Kamieniu"),
            ("Skierń", "Skierniu"),
            ("Radość", "Radościu"),
            ("Gródź", "Gródziu"),
            ("Kłobuck", "Kłobucku"),
            ("Brusk", "Brusku"),
            ("Bartek", "Barteku"),
            ("Złotoryjec", "Złotoryjcu"),
            ("Karniewiec", "Karniewcu"),
            ("Kunic", "Kunicu"),
            ("Wąbrzeż", "Wąbrzeżu"),
            ("Gosz", "Goszu"),
            ("Kołacz", "Kołaczu"),
            ("Koszarz", "Koszarzu"),
            ("Brzech", "Brzechu"),
            ("Brzeg", "Brzegu"),
            ("Dział", "Działe"),
            ("Gostynin", "Gostyninie"),
            ("Lębork", "Lęborku"),
            ("Kozłowat", "Kozłowacie"),
            ("Gród", "Gródzie"),
            ("Lesznom", "Lesznomiu"),
            ("Wolsztyl", "Wolsztylu"),
        ];
        for (nominative, expected) in cases {
            assert_eq!(decline_city_to_locative(nominative), expected, "{nominative}");
        }
    }

    #[test]
    fn unmatched_consonant_appends_default() {
        assert_eq!(decline_city_to_locative("Gołdap"), "Gołdapie");
        assert_eq!(decline_city_to_locative("Kolbuszop"), "Kolbuszopie");
        assert_eq!(decline_city_to_locative("Nowa Wieś"), "Nowa Wieśie");
    }

    #[test]
    fn multi_word_declines_only_last_token() {
        assert_eq!(decline_city_to_locative("Stara Ustka"), "Stara Ustce");
        assert_eq!(decline_city_to_locative("Nowe  Miasto Lubawskie"), "Nowe  Miasto Lubawskiu");
    }

    #[test]
    fn each_word_matches_exactly_one_rule() {
        assert_eq!(locative_rule_for("Sosnowiec"), Some(&SuffixRule::replace("iec", "cu")));
        assert_eq!(locative_rule_for("Mielec"), Some(&SuffixRule::replace("ec", "cu")));
        assert_eq!(locative_rule_for("Zakopane"), None);
        assert_eq!(locative_rule_for("Kolbuszop"), None);
    }

    #[test]
    fn no_rule_is_shadowed_by_an_earlier_one() {
        for set in [FEMININE_A, NEUTER_O, NEUTER_E, MASCULINE] {
            for rule in set.rules {
                let word = format!("Zyx{}", rule.suffix);
                assert_eq!(
                    set.matching(&word),
                    Some(rule),
                    "{} rule `{}` is shadowed",
                    set.name,
                    rule.suffix
                );
                assert_eq!(locative_rule_for(&word), Some(rule), "{word}");
            }
        }
    }

    #[test]
    fn applying_twice_is_not_idempotent() {
        let once = decline_city_to_locative("Polanka");
        let twice = decline_city_to_locative(&once);
        assert_ne!(once, twice);
    }
}
