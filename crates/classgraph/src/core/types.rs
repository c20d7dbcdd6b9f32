//! Core type definitions for diagram generation
//!
//! Diagram kinds, layout direction, and the Mermaid node shapes and edge
//! tokens shared by the encoders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Diagram notations a caller can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramType {
    /// Mermaid `classDiagram`
    #[default]
    Class,
    /// Mermaid `flowchart`
    Flowchart,
    /// Mermaid `sequenceDiagram`
    Sequence,
    /// Mermaid `erDiagram`
    Er,
    /// Mermaid `stateDiagram-v2`
    State,
}

impl DiagramType {
    /// All recognised diagram type names
    pub fn variants() -> &'static [DiagramType] {
        &[
            DiagramType::Class,
            DiagramType::Flowchart,
            DiagramType::Sequence,
            DiagramType::Er,
            DiagramType::State,
        ]
    }

    /// Mermaid header keyword for this notation
    pub fn keyword(&self) -> &'static str {
        match self {
            DiagramType::Class => "classDiagram",
            DiagramType::Flowchart => "flowchart",
            DiagramType::Sequence => "sequenceDiagram",
            DiagramType::Er => "erDiagram",
            DiagramType::State => "stateDiagram-v2",
        }
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramType::Class => write!(f, "class"),
            DiagramType::Flowchart => write!(f, "flowchart"),
            DiagramType::Sequence => write!(f, "sequence"),
            DiagramType::Er => write!(f, "er"),
            DiagramType::State => write!(f, "state"),
        }
    }
}

impl FromStr for DiagramType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "class" | "classdiagram" => Ok(DiagramType::Class),
            "flowchart" | "graph" => Ok(DiagramType::Flowchart),
            "sequence" | "sequencediagram" => Ok(DiagramType::Sequence),
            "er" | "erdiagram" => Ok(DiagramType::Er),
            "state" | "statediagram" | "statediagram-v2" => Ok(DiagramType::State),
            _ => Err(format!("Unknown diagram type: {}", s)),
        }
    }
}

/// Layout direction for the diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Top to bottom (TB or TD)
    #[default]
    #[serde(rename = "TB")]
    TopBottom,
    /// Bottom to top (BT)
    #[serde(rename = "BT")]
    BottomTop,
    /// Left to right (LR)
    #[serde(rename = "LR")]
    LeftRight,
    /// Right to left (RL)
    #[serde(rename = "RL")]
    RightLeft,
}

impl Direction {
    /// Parse direction from mermaid syntax (TB, TD, BT, LR, RL)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "TB" | "TD" => Some(Direction::TopBottom),
            "BT" => Some(Direction::BottomTop),
            "LR" => Some(Direction::LeftRight),
            "RL" => Some(Direction::RightLeft),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopBottom => write!(f, "TB"),
            Direction::BottomTop => write!(f, "BT"),
            Direction::LeftRight => write!(f, "LR"),
            Direction::RightLeft => write!(f, "RL"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::parse(s).ok_or_else(|| format!("Unknown direction: {}", s))
    }
}

/// Flowchart node shapes used for entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum NodeShape {
    /// Rectangle: `A[label]`
    #[default]
    Rectangle,
    /// Rounded rectangle: `A(label)`
    RoundedRect,
    /// Stadium: `A([label])`
    Stadium,
    /// Subroutine: `A[[label]]`
    Subroutine,
    /// Hexagon: `A{{label}}`
    Hexagon,
}

impl NodeShape {
    /// Opening and closing delimiters around the node label
    pub fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            NodeShape::Rectangle => ("[", "]"),
            NodeShape::RoundedRect => ("(", ")"),
            NodeShape::Stadium => ("([", "])"),
            NodeShape::Subroutine => ("[[", "]]"),
            NodeShape::Hexagon => ("{{", "}}"),
        }
    }
}

/// Flowchart edge tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EdgeType {
    /// Solid arrow: `-->`
    #[default]
    Arrow,
    /// Solid line (no arrow): `---`
    Line,
    /// Dotted arrow: `-.->`
    DottedArrow,
    /// Thick arrow: `==>`
    ThickArrow,
    /// Open circle end: `--o`
    OpenArrow,
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeType::Arrow => write!(f, "-->"),
            EdgeType::Line => write!(f, "---"),
            EdgeType::DottedArrow => write!(f, "-.->"),
            EdgeType::ThickArrow => write!(f, "==>"),
            EdgeType::OpenArrow => write!(f, "--o"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        assert_eq!(Direction::parse("TB"), Some(Direction::TopBottom));
        assert_eq!(Direction::parse("td"), Some(Direction::TopBottom));
        assert_eq!(Direction::parse("BT"), Some(Direction::BottomTop));
        assert_eq!(Direction::parse("LR"), Some(Direction::LeftRight));
        assert_eq!(Direction::parse("rl"), Some(Direction::RightLeft));
        assert_eq!(Direction::parse("invalid"), None);
        assert!("XX".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::TopBottom.to_string(), "TB");
        assert_eq!(Direction::BottomTop.to_string(), "BT");
        assert_eq!(Direction::LeftRight.to_string(), "LR");
        assert_eq!(Direction::RightLeft.to_string(), "RL");
    }

    #[test]
    fn test_diagram_type_parsing() {
        assert_eq!("class".parse::<DiagramType>(), Ok(DiagramType::Class));
        assert_eq!("classDiagram".parse::<DiagramType>(), Ok(DiagramType::Class));
        assert_eq!("FLOWCHART".parse::<DiagramType>(), Ok(DiagramType::Flowchart));
        assert_eq!("er".parse::<DiagramType>(), Ok(DiagramType::Er));
        assert!("pie".parse::<DiagramType>().is_err());
    }

    #[test]
    fn test_diagram_type_keywords() {
        assert_eq!(DiagramType::Class.keyword(), "classDiagram");
        assert_eq!(DiagramType::Flowchart.keyword(), "flowchart");
        assert_eq!(DiagramType::variants().len(), 5);
    }

    #[test]
    fn test_node_shape_delimiters() {
        assert_eq!(NodeShape::Rectangle.delimiters(), ("[", "]"));
        assert_eq!(NodeShape::Stadium.delimiters(), ("([", "])"));
        assert_eq!(NodeShape::Hexagon.delimiters(), ("{{", "}}"));
        assert_eq!(NodeShape::Subroutine.delimiters(), ("[[", "]]"));
    }

    #[test]
    fn test_edge_type_display() {
        assert_eq!(EdgeType::Arrow.to_string(), "-->");
        assert_eq!(EdgeType::Line.to_string(), "---");
        assert_eq!(EdgeType::DottedArrow.to_string(), "-.->");
        assert_eq!(EdgeType::ThickArrow.to_string(), "==>");
        assert_eq!(EdgeType::OpenArrow.to_string(), "--o");
    }
}
