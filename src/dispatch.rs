//! Kernel resolution table
//!
//! An explicit, immutable mapping from (storage format, operation) to a
//! kernel path, consulted by the uniform entry points on
//! [`SparseMatrix`](crate::sparse::SparseMatrix). Nothing is registered at
//! runtime and nothing is mutable: the table is a `const fn` match, so
//! resolution compiles down to nothing and dispatch overhead cannot
//! dominate operations measured in tens of nanoseconds.
//!
//! A pair the table maps to [`KernelPath::Convert`] is the documented
//! performance cliff: the operand is converted first (a full extra
//! structural pass), and the entry point logs the conversion before
//! running. A pair the table does not map at all reports
//! [`UnsupportedFormatPair`](crate::error::Error::UnsupportedFormatPair).

use crate::sparse::SparseFormat;

/// Operations the kernel library implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Sparse matrix-vector product
    MatVec,
    /// Sparse matrix-dense matrix product
    MatMat,
    /// Three-argument (bilinear) dot
    Dot3,
    /// Sparse + dense addition
    AddDense,
}

impl Operation {
    /// Returns the operation name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Operation::MatVec => "matvec",
            Operation::MatMat => "matmat",
            Operation::Dot3 => "dot3",
            Operation::AddDense => "add_dense",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a (format, operation) request is served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelPath {
    /// A kernel exists for the format; run it directly
    Direct,
    /// Convert the operand to the given format first (full structural
    /// pass), then run that format's kernel
    Convert(SparseFormat),
}

/// Resolve the kernel path for a (format, operation) pair
///
/// Every pair currently resolves to a direct kernel; the `Convert`
/// variant is the extension point for operations added without full
/// format coverage.
pub const fn resolve(format: SparseFormat, op: Operation) -> Option<KernelPath> {
    match (format, op) {
        (SparseFormat::Csr, Operation::MatVec)
        | (SparseFormat::Csc, Operation::MatVec)
        | (SparseFormat::Coo, Operation::MatVec)
        | (SparseFormat::Csr, Operation::MatMat)
        | (SparseFormat::Csc, Operation::MatMat)
        | (SparseFormat::Coo, Operation::MatMat)
        | (SparseFormat::Csr, Operation::Dot3)
        | (SparseFormat::Csc, Operation::Dot3)
        | (SparseFormat::Coo, Operation::Dot3)
        | (SparseFormat::Csr, Operation::AddDense)
        | (SparseFormat::Csc, Operation::AddDense)
        | (SparseFormat::Coo, Operation::AddDense) => Some(KernelPath::Direct),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMATS: [SparseFormat; 3] = [SparseFormat::Coo, SparseFormat::Csr, SparseFormat::Csc];
    const OPERATIONS: [Operation; 4] = [
        Operation::MatVec,
        Operation::MatMat,
        Operation::Dot3,
        Operation::AddDense,
    ];

    #[test]
    fn test_every_pair_resolves_direct() {
        for format in FORMATS {
            for op in OPERATIONS {
                assert_eq!(
                    resolve(format, op),
                    Some(KernelPath::Direct),
                    "({format}, {op}) must have a direct kernel"
                );
            }
        }
    }
}
