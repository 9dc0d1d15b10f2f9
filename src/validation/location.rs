use std::fmt::{Display, Formatter, Write};
use std::sync::Arc;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Segment {
    Field(&'static str),
    Indexed(&'static str, usize),
}

#[derive(Debug)]
struct Node {
    segment: Segment,
    prev: Option<Arc<Node>>,
}

/// The argument path a violation refers to, e.g. `vkQueueSubmit(): pSubmits[0].pWaitSemaphores[1]`.
///
/// Locations are immutable. Extending a location shares the existing path so building a location
/// for every element of a nested array only allocates one node per element.
#[derive(Clone, Debug)]
pub struct Location {
    function: &'static str,
    tail: Option<Arc<Node>>,
}

impl Location {
    /// Creates the location of a call to `function`.
    pub fn new(function: &'static str) -> Self {
        Self {
            function,
            tail: None,
        }
    }

    /// Returns the location of the member `field` of this location.
    pub fn dot(&self, field: &'static str) -> Self {
        self.push(Segment::Field(field))
    }

    /// Returns the location of the element `index` of the array member `field` of this location.
    pub fn dot_at(&self, field: &'static str, index: usize) -> Self {
        self.push(Segment::Indexed(field, index))
    }

    fn push(&self, segment: Segment) -> Self {
        Self {
            function: self.function,
            tail: Some(Arc::new(Node {
                segment,
                prev: self.tail.clone(),
            })),
        }
    }

    pub fn get_function(&self) -> &'static str {
        self.function
    }

    /// Returns the argument path without the function name.
    pub fn get_field_path(&self) -> String {
        let mut segments = Vec::new();
        let mut node = self.tail.as_deref();
        while let Some(current) = node {
            segments.push(current.segment);
            node = current.prev.as_deref();
        }

        let mut path = String::new();
        for (i, segment) in segments.iter().rev().enumerate() {
            if i != 0 {
                path.push('.');
            }
            match segment {
                Segment::Field(field) => path.push_str(field),
                Segment::Indexed(field, index) => {
                    write!(path, "{}[{}]", field, index).ok();
                }
            }
        }
        path
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.function == other.function && self.get_field_path() == other.get_field_path()
    }
}

impl Eq for Location {
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.tail.is_none() {
            write!(f, "{}()", self.function)
        } else {
            write!(f, "{}(): {}", self.function, self.get_field_path())
        }
    }
}
