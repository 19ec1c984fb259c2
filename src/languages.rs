//! ISO 639-2/T language names for the packed codes in `mdhd` and friends.

/// Sorted by code.
#[rustfmt::skip]
static LANGUAGES: &[(&str, &str)] = &[
    ("aar", "Afar"),
    ("abk", "Abkhazian"),
    ("afr", "Afrikaans"),
    ("aka", "Akan"),
    ("amh", "Amharic"),
    ("ara", "Arabic"),
    ("arg", "Aragonese"),
    ("asm", "Assamese"),
    ("ava", "Avaric"),
    ("ave", "Avestan"),
    ("aym", "Aymara"),
    ("aze", "Azerbaijani"),
    ("bak", "Bashkir"),
    ("bam", "Bambara"),
    ("bel", "Belarusian"),
    ("ben", "Bengali"),
    ("bis", "Bislama"),
    ("bod", "Tibetan"),
    ("bos", "Bosnian"),
    ("bre", "Breton"),
    ("bul", "Bulgarian"),
    ("cat", "Catalan"),
    ("ces", "Czech"),
    ("cha", "Chamorro"),
    ("che", "Chechen"),
    ("chu", "Church Slavic"),
    ("chv", "Chuvash"),
    ("cor", "Cornish"),
    ("cos", "Corsican"),
    ("cre", "Cree"),
    ("cym", "Welsh"),
    ("dan", "Danish"),
    ("deu", "German"),
    ("div", "Divehi"),
    ("dzo", "Dzongkha"),
    ("ell", "Greek, Modern (1453-)"),
    ("eng", "English"),
    ("epo", "Esperanto"),
    ("est", "Estonian"),
    ("eus", "Basque"),
    ("ewe", "Ewe"),
    ("fao", "Faroese"),
    ("fas", "Persian"),
    ("fij", "Fijian"),
    ("fin", "Finnish"),
    ("fra", "French"),
    ("fry", "Western Frisian"),
    ("ful", "Fulah"),
    ("gla", "Gaelic"),
    ("gle", "Irish"),
    ("glg", "Galician"),
    ("glv", "Manx"),
    ("grn", "Guarani"),
    ("guj", "Gujarati"),
    ("hat", "Haitian"),
    ("hau", "Hausa"),
    ("heb", "Hebrew"),
    ("her", "Herero"),
    ("hin", "Hindi"),
    ("hmo", "Hiri Motu"),
    ("hrv", "Croatian"),
    ("hun", "Hungarian"),
    ("hye", "Armenian"),
    ("ibo", "Igbo"),
    ("ido", "Ido"),
    ("iii", "Sichuan Yi"),
    ("iku", "Inuktitut"),
    ("ile", "Interlingue"),
    ("ina", "Interlingua"),
    ("ind", "Indonesian"),
    ("ipk", "Inupiaq"),
    ("isl", "Icelandic"),
    ("ita", "Italian"),
    ("jav", "Javanese"),
    ("jpn", "Japanese"),
    ("kal", "Kalaallisut"),
    ("kan", "Kannada"),
    ("kas", "Kashmiri"),
    ("kat", "Georgian"),
    ("kau", "Kanuri"),
    ("kaz", "Kazakh"),
    ("khm", "Central Khmer"),
    ("kik", "Kikuyu"),
    ("kin", "Kinyarwanda"),
    ("kir", "Kirghiz"),
    ("kom", "Komi"),
    ("kon", "Kongo"),
    ("kor", "Korean"),
    ("kua", "Kuanyama"),
    ("kur", "Kurdish"),
    ("lao", "Lao"),
    ("lat", "Latin"),
    ("lav", "Latvian"),
    ("lim", "Limburgan"),
    ("lin", "Lingala"),
    ("lit", "Lithuanian"),
    ("ltz", "Luxembourgish"),
    ("lub", "Luba-Katanga"),
    ("lug", "Ganda"),
    ("mah", "Marshallese"),
    ("mal", "Malayalam"),
    ("mar", "Marathi"),
    ("mis", "Uncoded languages"),
    ("mkd", "Macedonian"),
    ("mlg", "Malagasy"),
    ("mlt", "Maltese"),
    ("mon", "Mongolian"),
    ("mri", "Maori"),
    ("msa", "Malay"),
    ("mul", "Multiple languages"),
    ("mya", "Burmese"),
    ("nau", "Nauru"),
    ("nav", "Navajo"),
    ("nbl", "South Ndebele"),
    ("nde", "North Ndebele"),
    ("ndo", "Ndonga"),
    ("nep", "Nepali"),
    ("nld", "Dutch"),
    ("nno", "Norwegian Nynorsk"),
    ("nob", "Norwegian Bokmal"),
    ("nor", "Norwegian"),
    ("nya", "Chichewa"),
    ("oci", "Occitan (post 1500)"),
    ("oji", "Ojibwa"),
    ("ori", "Oriya"),
    ("orm", "Oromo"),
    ("oss", "Ossetian"),
    ("pan", "Panjabi"),
    ("pli", "Pali"),
    ("pol", "Polish"),
    ("por", "Portuguese"),
    ("pus", "Pushto"),
    ("que", "Quechua"),
    ("roh", "Romansh"),
    ("ron", "Romanian"),
    ("run", "Rundi"),
    ("rus", "Russian"),
    ("sag", "Sango"),
    ("san", "Sanskrit"),
    ("sin", "Sinhala"),
    ("slk", "Slovak"),
    ("slv", "Slovenian"),
    ("sme", "Northern Sami"),
    ("smo", "Samoan"),
    ("sna", "Shona"),
    ("snd", "Sindhi"),
    ("som", "Somali"),
    ("sot", "Southern Sotho"),
    ("spa", "Spanish"),
    ("sqi", "Albanian"),
    ("srd", "Sardinian"),
    ("srp", "Serbian"),
    ("ssw", "Swati"),
    ("sun", "Sundanese"),
    ("swa", "Swahili"),
    ("swe", "Swedish"),
    ("tah", "Tahitian"),
    ("tam", "Tamil"),
    ("tat", "Tatar"),
    ("tel", "Telugu"),
    ("tgk", "Tajik"),
    ("tgl", "Tagalog"),
    ("tha", "Thai"),
    ("tir", "Tigrinya"),
    ("ton", "Tonga (Tonga Islands)"),
    ("tsn", "Tswana"),
    ("tso", "Tsonga"),
    ("tuk", "Turkmen"),
    ("tur", "Turkish"),
    ("twi", "Twi"),
    ("uig", "Uighur"),
    ("ukr", "Ukrainian"),
    ("und", "Undetermined"),
    ("urd", "Urdu"),
    ("uzb", "Uzbek"),
    ("ven", "Venda"),
    ("vie", "Vietnamese"),
    ("vol", "Volapuk"),
    ("wln", "Walloon"),
    ("wol", "Wolof"),
    ("xho", "Xhosa"),
    ("yid", "Yiddish"),
    ("yor", "Yoruba"),
    ("zha", "Zhuang"),
    ("zho", "Chinese"),
    ("zul", "Zulu"),
    ("zxx", "No linguistic content"),
];

pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .binary_search_by(|&(c, _)| c.cmp(code))
        .ok()
        .map(|i| LANGUAGES[i].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        assert!(LANGUAGES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn lookup() {
        assert_eq!(language_name("eng"), Some("English"));
        assert_eq!(language_name("und"), Some("Undetermined"));
        assert_eq!(language_name("qaa"), None);
    }
}
