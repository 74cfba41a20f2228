// SPDX-License-Identifier: GPL-3.0-or-later

/// Language Code Identifier -- an integer identifying a language/locale as
/// used by Dataverse (e.g. 1033 = English US).
pub type Lcid = u32;

/// The org base language this crate assumes as the fallback source for
/// missing translations. Dataverse orgs can technically use a different
/// base language but English (1033) is by far the common case and is the
/// LCID the form-XML fallback rule is written against.
pub const BASE_LCID: Lcid = 1033;

/// Statically known LCIDs Dataverse can provision, w/ their English names.
/// Used to filter caller-supplied codes before touching user settings, and
/// for display purposes.
pub const KNOWN_LANGUAGES: &[(Lcid, &str)] = &[
    (1025, "Arabic"),
    (1069, "Basque"),
    (1026, "Bulgarian"),
    (1027, "Catalan"),
    (2052, "Chinese (Simplified)"),
    (1028, "Chinese (Traditional)"),
    (3076, "Chinese (Hong Kong SAR)"),
    (1050, "Croatian"),
    (1029, "Czech"),
    (1030, "Danish"),
    (1043, "Dutch"),
    (1033, "English"),
    (1061, "Estonian"),
    (1035, "Finnish"),
    (1036, "French"),
    (1110, "Galician"),
    (1031, "German"),
    (1032, "Greek"),
    (1037, "Hebrew"),
    (1081, "Hindi"),
    (1038, "Hungarian"),
    (1057, "Indonesian"),
    (1040, "Italian"),
    (1041, "Japanese"),
    (1087, "Kazakh"),
    (1042, "Korean"),
    (1062, "Latvian"),
    (1063, "Lithuanian"),
    (1086, "Malay"),
    (1044, "Norwegian (Bokmål)"),
    (1045, "Polish"),
    (1046, "Portuguese (Brazil)"),
    (2070, "Portuguese (Portugal)"),
    (1048, "Romanian"),
    (1049, "Russian"),
    (3098, "Serbian (Cyrillic)"),
    (2074, "Serbian (Latin)"),
    (1051, "Slovak"),
    (1060, "Slovenian"),
    (3082, "Spanish"),
    (1053, "Swedish"),
    (1054, "Thai"),
    (1055, "Turkish"),
    (1058, "Ukrainian"),
    (1066, "Vietnamese"),
];

/// TRUE if `lcid` is one Dataverse can provision.
pub fn is_known_lcid(lcid: Lcid) -> bool {
    KNOWN_LANGUAGES.iter().any(|(x, _)| *x == lcid)
}

/// English name of a known LCID, or `None`.
pub fn known_language_name(lcid: Lcid) -> Option<&'static str> {
    KNOWN_LANGUAGES
        .iter()
        .find(|(x, _)| *x == lcid)
        .map(|(_, name)| *name)
}
