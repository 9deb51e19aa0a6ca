/// The four ways a simple generator can act on one side of a KGB element.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Status {
    Complex,
    ImaginaryCompact,
    ImaginaryNoncompact,
    Real,
}

impl Status {
    pub fn is_imaginary(self) -> bool {
        matches!(self, Status::ImaginaryCompact | Status::ImaginaryNoncompact)
    }

    pub fn is_real(self) -> bool {
        matches!(self, Status::Real)
    }

    pub fn is_complex(self) -> bool {
        matches!(self, Status::Complex)
    }
}
