//! Card property definitions.
//!
//! A game declares the typed fields its cards carry as a tree of
//! `PropertyDef`s. Object-typed properties hold child definitions, and a
//! dotted name such as `"stats.attack"` is shorthand for an `Object` named
//! `stats` wrapping an `attack` child.

use serde::{Deserialize, Serialize};

/// Separator between an object property and its children in property paths.
pub const OBJECT_DELIMITER: &str = ".";

/// Character removed from `EscapedString` values.
pub const ESCAPE_CHARACTER: char = '\\';

/// How a property's value is read from card data and interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    #[default]
    String,
    EscapedString,
    Integer,
    Boolean,
    Object,
    StringEnum,
    StringList,
    StringEnumList,
    ObjectEnum,
    ObjectList,
    ObjectEnumList,
}

impl PropertyType {
    /// Types whose values are enum symbols.
    #[must_use]
    pub fn is_enum(self) -> bool {
        matches!(
            self,
            Self::StringEnum | Self::StringEnumList | Self::ObjectEnum | Self::ObjectEnumList
        )
    }

    /// Types whose values are lists joined by the enum delimiter.
    #[must_use]
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Self::StringList | Self::StringEnumList | Self::ObjectList | Self::ObjectEnumList
        )
    }

    /// Types that hold child property definitions.
    #[must_use]
    pub fn is_object(self) -> bool {
        matches!(self, Self::Object | Self::ObjectList)
    }
}

/// Definition of one card property.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawPropertyDef")]
pub struct PropertyDef {
    /// Field name in card data. Never contains the object delimiter.
    pub name: String,

    #[serde(rename = "type")]
    pub property_type: PropertyType,

    /// Label shown to users.
    pub display: String,

    /// Text shown when a card has no value for this property.
    pub display_empty: String,

    /// Whether the empty choice is listed before the declared enum values.
    pub display_empty_first: bool,

    /// Child definitions for `Object` and `ObjectList` properties.
    pub properties: Vec<PropertyDef>,

    /// For list types: when set, the raw value is one string split on this.
    pub delimiter: String,
}

/// Serialized form, before dotted names are expanded.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPropertyDef {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    property_type: PropertyType,
    #[serde(default)]
    display: String,
    #[serde(default, alias = "empty")]
    display_empty: String,
    #[serde(default)]
    display_empty_first: bool,
    #[serde(default, alias = "children")]
    properties: Vec<PropertyDef>,
    #[serde(default)]
    delimiter: String,
}

impl From<RawPropertyDef> for PropertyDef {
    fn from(raw: RawPropertyDef) -> Self {
        PropertyDef {
            name: raw.name,
            property_type: raw.property_type,
            display: raw.display,
            display_empty: raw.display_empty,
            display_empty_first: raw.display_empty_first,
            properties: raw.properties,
            delimiter: raw.delimiter,
        }
        .expand_dotted_name()
    }
}

impl PropertyDef {
    /// Create a property definition.
    ///
    /// A dotted `name` is expanded into nested `Object` definitions. Builder
    /// settings apply to the outermost definition; dotted leaves take their
    /// display settings from the serialized form.
    #[must_use]
    pub fn new(name: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            property_type,
            ..Self::default()
        }
        .expand_dotted_name()
    }

    /// Set the display label.
    #[must_use]
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }

    /// Set the text shown for cards without a value.
    #[must_use]
    pub fn with_display_empty(mut self, display_empty: impl Into<String>) -> Self {
        self.display_empty = display_empty.into();
        self
    }

    /// List the empty choice first in filter panels.
    #[must_use]
    pub fn with_display_empty_first(mut self) -> Self {
        self.display_empty_first = true;
        self
    }

    /// Set the list split delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Add a child definition (builder pattern).
    #[must_use]
    pub fn with_child(mut self, child: PropertyDef) -> Self {
        self.properties.push(child);
        self
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        self.property_type.is_object()
    }

    #[must_use]
    pub fn is_enum_type(&self) -> bool {
        self.property_type.is_enum()
    }

    #[must_use]
    pub fn is_list_type(&self) -> bool {
        self.property_type.is_list()
    }

    /// Resolve a dotted path, starting at this definition's name.
    ///
    /// Only `Object` and `ObjectList` definitions are descended into.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&PropertyDef> {
        if path == self.name {
            return Some(self);
        }
        if !self.is_object() {
            return None;
        }
        let rest = path
            .strip_prefix(self.name.as_str())?
            .strip_prefix(OBJECT_DELIMITER)?;
        self.properties.iter().find_map(|child| child.resolve(rest))
    }

    /// Rewrite `a.b` into `Object a { b }`, recursively.
    fn expand_dotted_name(mut self) -> Self {
        let Some((parent, child)) = self.name.split_once(OBJECT_DELIMITER) else {
            return self;
        };
        let parent = parent.to_string();
        self.name = child.to_string();
        let child = self.expand_dotted_name();
        PropertyDef {
            name: parent,
            property_type: PropertyType::Object,
            properties: vec![child],
            ..PropertyDef::default()
        }
    }
}

/// Resolve a dotted property path against a schema list.
#[must_use]
pub fn resolve_property<'a>(defs: &'a [PropertyDef], path: &str) -> Option<&'a PropertyDef> {
    defs.iter().find_map(|def| def.resolve(path))
}

/// Every addressable terminal property with its full dotted path.
///
/// Object properties contribute their children, prefixed by the parent name
/// and the object delimiter.
#[must_use]
pub fn flatten(defs: &[PropertyDef]) -> Vec<(String, &PropertyDef)> {
    let mut flattened = Vec::new();
    for def in defs {
        flatten_into(&mut flattened, def, String::new());
    }
    flattened
}

fn flatten_into<'a>(out: &mut Vec<(String, &'a PropertyDef)>, def: &'a PropertyDef, prefix: String) {
    let path = prefix + &def.name;
    if def.is_object() {
        let child_prefix = path + OBJECT_DELIMITER;
        for child in &def.properties {
            flatten_into(out, child, child_prefix.clone());
        }
    } else {
        out.push((path, def));
    }
}
