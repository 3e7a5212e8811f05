use serde_derive::{Deserialize, Serialize};

/// Raw type code marking an invalid/unclassified record, dropped before windowing.
pub const INVALID_RAW_TYPE: i32 = 5;

/// Reduced object category fed to the model.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    Pedestrian,
    Bicycle,
    Vehicle,
    Unknown,
}

impl ObjectClass {
    #[inline]
    pub fn code(self) -> i32 {
        match self {
            ObjectClass::Pedestrian => 1,
            ObjectClass::Bicycle => 2,
            ObjectClass::Vehicle => 3,
            ObjectClass::Unknown => -1,
        }
    }
}

impl From<ObjectClass> for i32 {
    #[inline]
    fn from(class: ObjectClass) -> Self {
        class.code()
    }
}

/// Maps raw type codes (1,2: small/big vehicle, 3: pedestrian, 4: cyclist) to a class.
#[inline]
pub fn classify(raw_type: i32) -> ObjectClass {
    match raw_type {
        1 | 2 => ObjectClass::Vehicle,
        3 => ObjectClass::Pedestrian,
        4 => ObjectClass::Bicycle,
        _ => ObjectClass::Unknown,
    }
}
