//! Selector type definitions.

use std::fmt;

/// A complex selector (e.g., "ul.menu > li:hover a").
///
/// A selector consists of one or more compound parts connected by combinators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Compound parts from left to right; the last one is the subject.
    pub parts: Vec<SelectorPart>,
    /// Combinators between parts (length = parts.len() - 1).
    pub combinators: Vec<Combinator>,
}

impl Selector {
    /// Get the rightmost (subject) selector part.
    pub fn subject(&self) -> Option<&SelectorPart> {
        self.parts.last()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                match &self.combinators[i - 1] {
                    Combinator::Descendant => write!(f, " ")?,
                    Combinator::Child => write!(f, " > ")?,
                    Combinator::AdjacentSibling => write!(f, " + ")?,
                    Combinator::GeneralSibling => write!(f, " ~ ")?,
                }
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// A compound selector (e.g., "input.wide[type=text]:focus").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorPart {
    /// Type selector (tag name or universal).
    pub type_selector: Option<TypeSelector>,
    /// ID selectors (#id). More than one is legal and rarely matches.
    pub ids: Vec<String>,
    /// Class selectors (.class).
    pub classes: Vec<String>,
    /// Attribute selectors ([attr=value]).
    pub attributes: Vec<AttributeSelector>,
    /// Pseudo-class selectors (:hover, :first-child, etc.).
    pub pseudo_classes: Vec<PseudoClass>,
    /// Trailing pseudo-element (::before). Elements never match these.
    pub pseudo_element: Option<String>,
}

impl SelectorPart {
    /// Whether nothing has been added to this part yet.
    pub fn is_empty(&self) -> bool {
        self.type_selector.is_none()
            && self.ids.is_empty()
            && self.classes.is_empty()
            && self.attributes.is_empty()
            && self.pseudo_classes.is_empty()
            && self.pseudo_element.is_none()
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_selector {
            Some(TypeSelector::Universal) => write!(f, "*")?,
            Some(TypeSelector::Type(name)) => write!(f, "{}", name)?,
            None => {}
        }
        for id in &self.ids {
            write!(f, "#{}", id)?;
        }
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        for attr in &self.attributes {
            write!(f, "{}", attr)?;
        }
        for pseudo in &self.pseudo_classes {
            write!(f, "{}", pseudo)?;
        }
        if let Some(pseudo) = &self.pseudo_element {
            write!(f, "::{}", pseudo)?;
        }
        Ok(())
    }
}

/// Type selector variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSelector {
    /// Universal selector (*).
    Universal,
    /// Specific tag name, lowercased.
    Type(String),
}

/// An attribute selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSelector {
    /// Attribute name, lowercased.
    pub name: String,
    /// Operator and value; `None` for `[name]`.
    pub operation: Option<(AttributeOperator, String)>,
    /// The `i` flag.
    pub case_insensitive: bool,
}

impl AttributeSelector {
    /// Test an attribute value (or its absence) against this selector.
    pub fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        let Some((operator, expected)) = &self.operation else {
            return true;
        };

        let (value, expected) = if self.case_insensitive {
            (value.to_ascii_lowercase(), expected.to_ascii_lowercase())
        } else {
            (value.to_string(), expected.clone())
        };

        match operator {
            AttributeOperator::Equals => value == expected,
            AttributeOperator::Includes => value.split_ascii_whitespace().any(|w| w == expected),
            AttributeOperator::DashMatch => {
                value == expected || value.starts_with(&format!("{expected}-"))
            }
            AttributeOperator::Prefix => !expected.is_empty() && value.starts_with(&expected),
            AttributeOperator::Suffix => !expected.is_empty() && value.ends_with(&expected),
            AttributeOperator::Substring => !expected.is_empty() && value.contains(&expected),
        }
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.name)?;
        if let Some((operator, value)) = &self.operation {
            write!(f, "{}\"{}\"", operator, value)?;
        }
        if self.case_insensitive {
            write!(f, " i")?;
        }
        write!(f, "]")
    }
}

/// Attribute selector operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeOperator {
    /// `=`
    Equals,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

impl fmt::Display for AttributeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Equals => "=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
            Self::Prefix => "^=",
            Self::Suffix => "$=",
            Self::Substring => "*=",
        };
        f.write_str(op)
    }
}

/// Pseudo-class selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoClass {
    /// Mouse is over the element.
    Hover,
    /// Element is being activated.
    Active,
    /// Element has focus.
    Focus,
    /// Checkbox or radio is checked.
    Checked,
    /// Element is disabled.
    Disabled,
    /// Element is enabled.
    Enabled,
    /// First child of its parent.
    FirstChild,
    /// Last child of its parent.
    LastChild,
    /// Only child of its parent.
    OnlyChild,
    /// Element has no children.
    Empty,
    /// Element is the document root.
    Root,
    /// Negation; matches when none of the compounds match.
    Not(Vec<SelectorPart>),
}

impl PseudoClass {
    /// Look up a non-functional pseudo-class by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let pseudo = match name.to_ascii_lowercase().as_str() {
            "hover" => Self::Hover,
            "active" => Self::Active,
            "focus" => Self::Focus,
            "checked" => Self::Checked,
            "disabled" => Self::Disabled,
            "enabled" => Self::Enabled,
            "first-child" => Self::FirstChild,
            "last-child" => Self::LastChild,
            "only-child" => Self::OnlyChild,
            "empty" => Self::Empty,
            "root" => Self::Root,
            _ => return None,
        };
        Some(pseudo)
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hover => write!(f, ":hover"),
            Self::Active => write!(f, ":active"),
            Self::Focus => write!(f, ":focus"),
            Self::Checked => write!(f, ":checked"),
            Self::Disabled => write!(f, ":disabled"),
            Self::Enabled => write!(f, ":enabled"),
            Self::FirstChild => write!(f, ":first-child"),
            Self::LastChild => write!(f, ":last-child"),
            Self::OnlyChild => write!(f, ":only-child"),
            Self::Empty => write!(f, ":empty"),
            Self::Root => write!(f, ":root"),
            Self::Not(parts) => {
                write!(f, ":not(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", part)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Selector combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant combinator (space).
    Descendant,
    /// Child combinator (>).
    Child,
    /// Adjacent sibling combinator (+).
    AdjacentSibling,
    /// General sibling combinator (~).
    GeneralSibling,
}
