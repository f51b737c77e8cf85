//! Connectors: the resolved, anchored relationships between shapes.
//!
//! A connector only exists after cross-reference resolution has succeeded
//! for every endpoint it needs; there is no such thing as a half-connected
//! connector in a loaded document.

use std::fmt::{self, Display};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::model::{
    InterfaceModel, LinkKind, LinkModel, SdMessageModel, UnknownEnumLiteral,
};
use crate::shape::{LinkableShape, SdInstanceShape};

/// Where on its parent shape a lollipop anchor attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttachmentSide {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl AttachmentSide {
    /// Parse the wire literal (`NORTH`, `SOUTHWEST`, ...).
    pub fn from_literal(literal: &str) -> Result<Self, UnknownEnumLiteral> {
        match literal.to_ascii_uppercase().as_str() {
            "NORTH" => Ok(Self::North),
            "NORTHEAST" => Ok(Self::NorthEast),
            "EAST" => Ok(Self::East),
            "SOUTHEAST" => Ok(Self::SouthEast),
            "SOUTH" => Ok(Self::South),
            "SOUTHWEST" => Ok(Self::SouthWest),
            "WEST" => Ok(Self::West),
            "NORTHWEST" => Ok(Self::NorthWest),
            _ => Err(UnknownEnumLiteral::new(literal, "AttachmentSide")),
        }
    }
}

impl Display for AttachmentSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::North => "NORTH",
            Self::NorthEast => "NORTHEAST",
            Self::East => "EAST",
            Self::SouthEast => "SOUTHEAST",
            Self::South => "SOUTH",
            Self::SouthWest => "SOUTHWEST",
            Self::West => "WEST",
            Self::NorthWest => "NORTHWEST",
        };
        write!(f, "{s}")
    }
}

/// A routing waypoint on a link line.
///
/// `parent` is set only when the link is a self-loop, in which case every
/// control point is reparented to the looping shape so it moves with it.
#[derive(Debug, Clone)]
pub struct ControlPoint {
    pub position: Point,
    pub parent: Option<LinkableShape>,
}

impl ControlPoint {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            parent: None,
        }
    }
}

/// Positions of the three optional link labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkLabels {
    pub center: Option<Point>,
    pub source: Option<Point>,
    pub destination: Option<Point>,
}

/// A fully resolved two-endpoint connector.
///
/// Endpoint anchors sit at the persisted coordinates, which are
/// authoritative over wherever the owning shapes' default anchors would
/// land.
#[derive(Debug, Clone)]
pub struct LinkShape {
    pub model: LinkModel,
    pub source: LinkableShape,
    pub destination: LinkableShape,
    pub source_anchor: Point,
    pub destination_anchor: Point,
    pub spline: bool,
    pub control_points: Vec<ControlPoint>,
    pub labels: LinkLabels,
}

impl LinkShape {
    /// The UML relationship kind of this connector.
    pub fn kind(&self) -> LinkKind {
        self.model.kind
    }

    /// True when both endpoints are the identical shape instance.
    pub fn is_self_loop(&self) -> bool {
        self.source.is_same_shape(&self.destination)
    }
}

/// A lollipop interface realization: one anchored symbol on one shape,
/// bound by implementor name rather than identifier.
#[derive(Debug, Clone)]
pub struct LollipopShape {
    pub interface: InterfaceModel,
    pub anchor: Point,
    pub side: AttachmentSide,
    pub implementor: LinkableShape,
}

/// A resolved sequence-diagram message between two instances.
///
/// The model's `source`/`destination` references are guaranteed to be set
/// (see [`SdMessageModel::attach_instances`]).
#[derive(Debug, Clone)]
pub struct SdMessageShape {
    pub model: SdMessageModel,
    pub source: Rc<SdInstanceShape>,
    pub destination: Rc<SdInstanceShape>,
}

/// Any connector a document's link collection can hold.
#[derive(Debug, Clone)]
pub enum Connector {
    Link(LinkShape),
    Lollipop(LollipopShape),
}

impl Connector {
    /// The relationship kind, with lollipops reporting `Interface`.
    pub fn kind(&self) -> LinkKind {
        match self {
            Self::Link(link) => link.kind(),
            Self::Lollipop(_) => LinkKind::Interface,
        }
    }
}
