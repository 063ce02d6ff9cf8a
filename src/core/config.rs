//! Game definition configuration.
//!
//! Games describe themselves with a JSON document:
//! - `cardProperties`: The typed fields every card may carry
//! - `enums`: Symbol tables for enum-valued properties
//! - `extras`: Rules that pull cards out of the main deck
//! - `*Identifier` fields: Which raw card/set fields hold ids, names, sets
//! - `deckFile*` fields: How decks are saved and loaded
//!
//! The engine never hardcodes a game's fields - games define them. Every key
//! is optional, so `{"name": "My Game"}` is a complete definition.

use serde::{Deserialize, Serialize};

use crate::schema::{EnumDef, PropertyDef};

/// Name of a game that has not been given one.
pub const DEFAULT_GAME_NAME: &str = "_INVALID_";

/// Code (and name) of the set that holds cards without a set.
pub const DEFAULT_SET_CODE: &str = "_CGSDEFAULT_";

/// Group used by extra rules that don't name one.
pub const DEFAULT_EXTRA_GROUP: &str = "Extras";

/// Deck file formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckFileType {
    /// `<count> <name>` lines (old MTGO format).
    Dec,
    /// Base64 varint deck string (Hearthstone format).
    Hsd,
    /// `<count> [id] <name> (set)` lines.
    #[default]
    Txt,
    /// Bare card ids between `#main`/`#extra`/`!side` markers (YGOPro format).
    Ydk,
}

impl DeckFileType {
    /// Lowercase file extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            DeckFileType::Dec => "dec",
            DeckFileType::Hsd => "hsd",
            DeckFileType::Txt => "txt",
            DeckFileType::Ydk => "ydk",
        }
    }
}

impl std::fmt::Display for DeckFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Which card field disambiguates same-named cards in txt decks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckFileTxtId {
    /// Prefix the line with `[id]`.
    Id,
    /// Suffix the line with `(setCode)`.
    #[default]
    Set,
}

/// Rule that marks cards as "extra" (heroes in hsd, extra deck in ydk).
///
/// A card belongs to the group when its `property` equals `value`, or, for
/// enum properties, when its display text contains `value`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraDef {
    /// Group name. Empty means [`DEFAULT_EXTRA_GROUP`].
    pub group: String,
    pub property: String,
    pub value: String,
}

impl ExtraDef {
    /// Create an extra rule.
    pub fn new(
        group: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            property: property.into(),
            value: value.into(),
        }
    }

    /// Group name, falling back to the default group.
    #[must_use]
    pub fn group_name(&self) -> &str {
        if self.group.is_empty() {
            DEFAULT_EXTRA_GROUP
        } else {
            &self.group
        }
    }
}

/// Complete game definition.
///
/// Deserialized from the game's JSON file; unspecified fields keep their
/// defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameDef {
    /// Name shown to users.
    pub name: String,

    /// Raw card field holding the card id.
    pub card_id_identifier: String,

    /// If set, ids are cut at the first occurrence of this string's first character.
    pub card_id_stop: String,

    /// Raw card field holding the card name.
    pub card_name_identifier: String,

    /// If true, later cards sharing a name are reprints.
    pub card_name_is_unique: bool,

    /// Property shown first when a card is inspected.
    pub card_primary_property: String,

    /// Declared card properties, in declaration order.
    pub card_properties: Vec<PropertyDef>,

    /// Field of objectEnum sub-objects holding the enum symbol.
    pub card_property_identifier: String,

    /// Raw card field holding the set code(s). May be a dotted path.
    pub card_set_identifier: String,

    /// Raw card field holding the set name.
    pub card_set_name_identifier: String,

    /// `cardSetIdentifier` points at a set object (or list of them).
    pub card_set_is_object: bool,

    /// `cardSetIdentifier` points at a list; one card is made per set.
    pub card_sets_in_list: bool,

    /// `cardSetIdentifier` holds comma-separated set codes.
    pub card_sets_in_list_is_csv: bool,

    /// If set, dotted path to the card array inside the cards document.
    pub card_data_identifier: String,

    /// Integer property used as the card id by hsd and ydk decks.
    #[serde(alias = "deckFileHsdId")]
    pub deck_file_alt_id: String,

    /// Disambiguator for same-named cards in txt decks.
    pub deck_file_txt_id: DeckFileTxtId,

    /// Default deck format.
    pub deck_file_type: DeckFileType,

    /// Enum tables, in declaration order.
    pub enums: Vec<EnumDef>,

    /// Extra-card rules.
    pub extras: Vec<ExtraDef>,

    /// Set record field holding the set's cards.
    pub set_cards_identifier: String,

    /// Set code for cards that don't specify one.
    pub set_code_default: String,

    /// Set record field holding the set code.
    pub set_code_identifier: String,

    /// If set, dotted path to the set array inside the sets document.
    pub set_data_identifier: String,

    /// Name of the default set.
    pub set_name_default: String,

    /// Set record field holding the set name.
    pub set_name_identifier: String,
}

impl Default for GameDef {
    fn default() -> Self {
        Self {
            name: DEFAULT_GAME_NAME.to_string(),
            card_id_identifier: "id".to_string(),
            card_id_stop: String::new(),
            card_name_identifier: "name".to_string(),
            card_name_is_unique: true,
            card_primary_property: String::new(),
            card_properties: Vec::new(),
            card_property_identifier: "id".to_string(),
            card_set_identifier: "set".to_string(),
            card_set_name_identifier: "setname".to_string(),
            card_set_is_object: false,
            card_sets_in_list: false,
            card_sets_in_list_is_csv: false,
            card_data_identifier: String::new(),
            deck_file_alt_id: "dbfId".to_string(),
            deck_file_txt_id: DeckFileTxtId::Set,
            deck_file_type: DeckFileType::Txt,
            enums: Vec::new(),
            extras: Vec::new(),
            set_cards_identifier: "cards".to_string(),
            set_code_default: DEFAULT_SET_CODE.to_string(),
            set_code_identifier: "code".to_string(),
            set_data_identifier: String::new(),
            set_name_default: DEFAULT_SET_CODE.to_string(),
            set_name_identifier: "name".to_string(),
        }
    }
}

impl GameDef {
    /// Create a definition with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a game definition document.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Add a card property.
    #[must_use]
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.card_properties.push(property);
        self
    }

    /// Add an enum table.
    #[must_use]
    pub fn with_enum(mut self, enum_def: EnumDef) -> Self {
        self.enums.push(enum_def);
        self
    }

    /// Add an extra-card rule.
    #[must_use]
    pub fn with_extra(mut self, extra: ExtraDef) -> Self {
        self.extras.push(extra);
        self
    }

    /// Set the alternate id property used by hsd and ydk decks.
    #[must_use]
    pub fn with_deck_file_alt_id(mut self, property: impl Into<String>) -> Self {
        self.deck_file_alt_id = property.into();
        self
    }

    /// Set the default deck format.
    #[must_use]
    pub fn with_deck_file_type(mut self, file_type: DeckFileType) -> Self {
        self.deck_file_type = file_type;
        self
    }

    /// Set the txt disambiguator.
    #[must_use]
    pub fn with_deck_file_txt_id(mut self, txt_id: DeckFileTxtId) -> Self {
        self.deck_file_txt_id = txt_id;
        self
    }

    /// Allow different cards to share a name without being reprints.
    #[must_use]
    pub fn with_non_unique_names(mut self) -> Self {
        self.card_name_is_unique = false;
        self
    }
}
