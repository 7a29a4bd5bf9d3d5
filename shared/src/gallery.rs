/// A before/after pair shown on the landing page. Paths are relative to the
/// frontend build root; the files ship in `frontend/images`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExamplePair {
    pub original: &'static str,
    pub processed: &'static str,
    pub h: f32,
}

impl ExamplePair {
    pub fn caption(&self) -> String {
        format!("Generated using h = {}", self.h)
    }
}

pub const EXAMPLES: [ExamplePair; 3] = [
    ExamplePair {
        original: "images/building.svg",
        processed: "images/buildingFix.svg",
        h: 0.04,
    },
    ExamplePair {
        original: "images/dog.svg",
        processed: "images/dogFix.svg",
        h: 0.03,
    },
    ExamplePair {
        original: "images/train.svg",
        processed: "images/trainFix.svg",
        h: 0.033,
    },
];
