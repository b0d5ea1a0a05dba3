use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Header,
    Navbar,
    Sidebar,
    Footer,
    Button,
    Input,
    Form,
    Card,
    Image,
    Text,
    Icon,
    Container,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveElementRecord {
    pub element_type: ElementKind,
    pub position: Position,
    pub dimensions: Dimensions,
    pub styling: IndexMap<String, String>,
    pub states: Option<IndexMap<String, String>>,
    pub text_content: Option<String>,
}
