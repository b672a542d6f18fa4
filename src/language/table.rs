// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

// Codes follow ISO 639-1 where one exists, ISO 639-3 otherwise.
// Reference: https://www.loc.gov/standards/iso639-2/php/code_list.php

use super::catalog::LanguageEntry;

const fn lang(code: &'static str, english_name: &'static str, native_name: &'static str) -> LanguageEntry {
    LanguageEntry { code, english_name, native_name }
}

/// Languages recognized in translation sheet headers.
///
/// Order matters: when two codes share a normalized name, the earlier entry wins.
pub const LANGUAGES: &[LanguageEntry] = &[
    lang("en", "English", "English"),
    lang("es", "Spanish", "Español"),
    lang("pt", "Portuguese", "Português"),
    lang("pt-BR", "Portuguese (Brazil)", "Português (Brasil)"),
    lang("fr", "French", "Français"),
    lang("de", "German", "Deutsch"),
    lang("it", "Italian", "Italiano"),
    lang("nl", "Dutch", "Nederlands"),
    lang("ru", "Russian", "Русский"),
    lang("uk", "Ukrainian", "Українська"),
    lang("pl", "Polish", "Polski"),
    lang("cs", "Czech", "Čeština"),
    lang("sk", "Slovak", "Slovenčina"),
    lang("sl", "Slovenian", "Slovenščina"),
    lang("hr", "Croatian", "Hrvatski"),
    lang("sr", "Serbian", "Српски"),
    lang("bs", "Bosnian", "Bosanski"),
    lang("mk", "Macedonian", "Македонски"),
    lang("bg", "Bulgarian", "Български"),
    lang("ro", "Romanian", "Română"),
    lang("hu", "Hungarian", "Magyar"),
    lang("el", "Greek", "Ελληνικά"),
    lang("sq", "Albanian", "Shqip"),
    lang("tr", "Turkish", "Türkçe"),
    lang("az", "Azerbaijani", "Azərbaycan dili"),
    lang("ka", "Georgian", "ქართული"),
    lang("hy", "Armenian", "Հայերեն"),
    lang("be", "Belarusian", "Беларуская"),
    lang("lt", "Lithuanian", "Lietuvių"),
    lang("lv", "Latvian", "Latviešu"),
    lang("et", "Estonian", "Eesti"),
    lang("fi", "Finnish", "Suomi"),
    lang("sv", "Swedish", "Svenska"),
    lang("no", "Norwegian", "Norsk"),
    lang("nb", "Norwegian Bokmål", "Norsk bokmål"),
    lang("nn", "Norwegian Nynorsk", "Norsk nynorsk"),
    lang("da", "Danish", "Dansk"),
    lang("is", "Icelandic", "Íslenska"),
    lang("fo", "Faroese", "Føroyskt"),
    lang("ga", "Irish", "Gaeilge"),
    lang("gd", "Scottish Gaelic", "Gàidhlig"),
    lang("cy", "Welsh", "Cymraeg"),
    lang("br", "Breton", "Brezhoneg"),
    lang("eu", "Basque", "Euskara"),
    lang("ca", "Catalan", "Català"),
    lang("gl", "Galician", "Galego"),
    lang("oc", "Occitan", "Occitan"),
    lang("lb", "Luxembourgish", "Lëtzebuergesch"),
    lang("mt", "Maltese", "Malti"),
    lang("la", "Latin", "Latina"),
    lang("eo", "Esperanto", "Esperanto"),
    lang("ar", "Arabic", "العربية"),
    lang("he", "Hebrew", "עברית"),
    lang("fa", "Persian", "فارسی"),
    lang("ps", "Pashto", "پښتو"),
    lang("ku", "Kurdish", "Kurdî"),
    lang("ur", "Urdu", "اردو"),
    lang("hi", "Hindi", "हिन्दी"),
    lang("bn", "Bengali", "বাংলা"),
    lang("pa", "Punjabi", "ਪੰਜਾਬੀ"),
    lang("gu", "Gujarati", "ગુજરાતી"),
    lang("mr", "Marathi", "मराठी"),
    lang("ne", "Nepali", "नेपाली"),
    lang("si", "Sinhala", "සිංහල"),
    lang("ta", "Tamil", "தமிழ்"),
    lang("te", "Telugu", "తెలుగు"),
    lang("kn", "Kannada", "ಕನ್ನಡ"),
    lang("ml", "Malayalam", "മലയാളം"),
    lang("or", "Odia", "ଓଡ଼ିଆ"),
    lang("as", "Assamese", "অসমীয়া"),
    lang("dv", "Dhivehi", "ދިވެހި"),
    lang("bo", "Tibetan", "བོད་ཡིག"),
    lang("dz", "Dzongkha", "རྫོང་ཁ"),
    lang("zh", "Chinese", "中文"),
    lang("zh-TW", "Chinese (Traditional)", "繁體中文"),
    lang("ja", "Japanese", "日本語"),
    lang("ko", "Korean", "한국어"),
    lang("mn", "Mongolian", "Монгол"),
    lang("kk", "Kazakh", "Қазақ тілі"),
    lang("ky", "Kyrgyz", "Кыргызча"),
    lang("uz", "Uzbek", "Oʻzbekcha"),
    lang("tg", "Tajik", "Тоҷикӣ"),
    lang("tk", "Turkmen", "Türkmençe"),
    lang("ug", "Uyghur", "ئۇيغۇرچە"),
    lang("th", "Thai", "ไทย"),
    lang("lo", "Lao", "ລາວ"),
    lang("km", "Khmer", "ខ្មែរ"),
    lang("my", "Burmese", "မြန်မာ"),
    lang("vi", "Vietnamese", "Tiếng Việt"),
    lang("id", "Indonesian", "Bahasa Indonesia"),
    lang("ms", "Malay", "Bahasa Melayu"),
    lang("jv", "Javanese", "Basa Jawa"),
    lang("su", "Sundanese", "Basa Sunda"),
    lang("tl", "Tagalog", "Tagalog"),
    lang("fil", "Filipino", "Filipino"),
    lang("ceb", "Cebuano", "Sinugbuanong Binisayâ"),
    lang("mg", "Malagasy", "Malagasy"),
    lang("mi", "Maori", "Te Reo Māori"),
    lang("sm", "Samoan", "Gagana Samoa"),
    lang("to", "Tongan", "Lea Faka-Tonga"),
    lang("fj", "Fijian", "Na Vosa Vakaviti"),
    lang("haw", "Hawaiian", "ʻŌlelo Hawaiʻi"),
    lang("tpi", "Tok Pisin", "Tok Pisin"),
    lang("bi", "Bislama", "Bislama"),
    lang("ty", "Tahitian", "Reo Tahiti"),
    lang("sw", "Swahili", "Kiswahili"),
    lang("am", "Amharic", "አማርኛ"),
    lang("ti", "Tigrinya", "ትግርኛ"),
    lang("om", "Oromo", "Afaan Oromoo"),
    lang("so", "Somali", "Soomaali"),
    lang("ha", "Hausa", "Hausa"),
    lang("yo", "Yoruba", "Yorùbá"),
    lang("ig", "Igbo", "Igbo"),
    lang("ff", "Fula", "Fulfulde"),
    lang("wo", "Wolof", "Wolof"),
    lang("bm", "Bambara", "Bamanankan"),
    lang("ak", "Akan", "Akan"),
    lang("ee", "Ewe", "Eʋegbe"),
    lang("ln", "Lingala", "Lingála"),
    lang("kg", "Kongo", "Kikongo"),
    lang("lg", "Ganda", "Luganda"),
    lang("rw", "Kinyarwanda", "Ikinyarwanda"),
    lang("rn", "Kirundi", "Ikirundi"),
    lang("ny", "Chichewa", "Chicheŵa"),
    lang("sn", "Shona", "chiShona"),
    lang("zu", "Zulu", "isiZulu"),
    lang("xh", "Xhosa", "isiXhosa"),
    lang("st", "Sesotho", "Sesotho"),
    lang("tn", "Tswana", "Setswana"),
    lang("ts", "Tsonga", "Xitsonga"),
    lang("ss", "Swati", "SiSwati"),
    lang("ve", "Venda", "Tshivenḓa"),
    lang("af", "Afrikaans", "Afrikaans"),
    lang("ki", "Kikuyu", "Gĩkũyũ"),
    lang("luo", "Luo", "Dholuo"),
    lang("kab", "Kabyle", "Taqbaylit"),
    lang("ber", "Berber", "Tamaziɣt"),
    lang("qu", "Quechua", "Runa Simi"),
    lang("ay", "Aymara", "Aymar aru"),
    lang("gn", "Guarani", "Avañe'ẽ"),
    lang("nah", "Nahuatl", "Nāhuatl"),
    lang("yua", "Yucatec Maya", "Maayat'aan"),
    lang("quc", "K'iche'", "K'iche'"),
    lang("mam", "Mam", "Qyool Mam"),
    lang("kek", "Q'eqchi'", "Q'eqchi'"),
    lang("arn", "Mapudungun", "Mapudungun"),
    lang("shp", "Shipibo-Conibo", "Shipibo"),
    lang("agr", "Awajún", "Awajún"),
    lang("cof", "Cofán", "A'ingae"),
    lang("wao", "Waorani", "Wao Tededo"),
    lang("kbh", "Camsá", "Camëntsá"),
    lang("ht", "Haitian Creole", "Kreyòl ayisyen"),
    lang("pap", "Papiamento", "Papiamentu"),
    lang("srn", "Sranan Tongo", "Sranantongo"),
    lang("iu", "Inuktitut", "ᐃᓄᒃᑎᑐᑦ"),
    lang("kl", "Greenlandic", "Kalaallisut"),
    lang("cr", "Cree", "ᓀᐦᐃᔭᐍᐏᐣ"),
    lang("oj", "Ojibwe", "ᐊᓂᔑᓈᐯᒧᐎᓐ"),
    lang("nv", "Navajo", "Diné bizaad"),
    lang("chr", "Cherokee", "ᏣᎳᎩ"),
    lang("se", "Northern Sami", "Davvisámegiella"),
    lang("yi", "Yiddish", "ייִדיש"),
];
