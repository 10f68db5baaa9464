//! Static persona catalog
//!
//! The catalog is fixed at compile time and never changes while the app runs.

use serde::Serialize;

/// A selectable historical figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
    /// Identifier sent to the backend
    pub id: &'static str,
    pub name: &'static str,
    /// Lifetime shown under the name
    pub era: &'static str,
    /// One-line summary for the gallery card
    pub description: &'static str,
    pub bio: &'static str,
    /// Portrait URL
    pub image: &'static str,
}

impl Persona {
    /// Initials used as a portrait placeholder
    pub fn monogram(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .filter(|c| c.is_alphabetic())
            .take(2)
            .collect()
    }
}

const PERSONAS: &[Persona] = &[
    Persona {
        id: "einstein",
        name: "Albert Einstein",
        era: "1879-1955",
        description: "Theoretical physicist who developed the theory of relativity",
        bio: "One of the most influential physicists of the 20th century, Einstein \
              revolutionized our understanding of space, time, gravity, and the universe.",
        image: "https://images.unsplash.com/photo-1630635280270-00799dd04da6?fm=jpg&w=1080",
    },
    Persona {
        id: "gandhi",
        name: "Mahatma Gandhi",
        era: "1869-1948",
        description: "Leader of Indian independence through nonviolent resistance",
        bio: "Gandhi pioneered the philosophy of nonviolent resistance, leading India to \
              independence and inspiring civil rights movements worldwide.",
        image: "https://images.unsplash.com/photo-1733255024979-8620deee5245?fm=jpg&w=1080",
    },
    Persona {
        id: "cleopatra",
        name: "Cleopatra VII",
        era: "69-30 BCE",
        description: "Last active ruler of the Ptolemaic Kingdom of Egypt",
        bio: "Known for her intelligence, political acumen, and relationships with Julius \
              Caesar and Mark Antony, Cleopatra was one of history's most powerful women.",
        image: "https://images.unsplash.com/photo-1630301812438-8e5fd7a36aba?fm=jpg&w=1080",
    },
];

/// All personas, in gallery order
pub fn catalog() -> &'static [Persona] {
    PERSONAS
}

/// Look up a persona by id
pub fn find(id: &str) -> Option<&'static Persona> {
    PERSONAS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<_> = catalog().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), catalog().len());
        assert_eq!(catalog().len(), 3);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("gandhi").map(|p| p.name), Some("Mahatma Gandhi"));
        assert!(find("napoleon").is_none());
    }

    #[test]
    fn test_monogram() {
        assert_eq!(find("einstein").unwrap().monogram(), "AE");
        assert_eq!(find("cleopatra").unwrap().monogram(), "CV");
    }
}
