/// Storage type of a single vertex attribute component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float16,
    Float32,
}

impl ComponentType {
    pub fn byte_length(&self) -> usize {
        match self {
            ComponentType::Int8 | ComponentType::Uint8 => 1,
            ComponentType::Int16 | ComponentType::Uint16 | ComponentType::Float16 => 2,
            ComponentType::Int32 | ComponentType::Uint32 | ComponentType::Float32 => 4,
        }
    }
}
