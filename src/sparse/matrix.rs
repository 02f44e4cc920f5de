//! Format-as-variant sparse matrix wrapper

use crate::backend::Backend;
use crate::dispatch::{KernelPath, Operation, resolve};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::ops;

use super::convert;
use super::coo::CooMatrix;
use super::csc::CscMatrix;
use super::csr::CsrMatrix;
use super::format::{SparseFormat, SparseStorage};

/// Sparse matrix with a runtime-selected storage format
///
/// `SparseMatrix` wraps the three storage formats behind one type and
/// provides a uniform entry point per operation. Format resolution is an
/// enum match against the [`dispatch`](crate::dispatch) table; backend
/// resolution is monomorphization. Callers that know their format
/// statically can use the per-format types directly and skip the tag
/// entirely.
#[derive(Debug, Clone)]
pub enum SparseMatrix<B: Backend, T: Element> {
    /// COO storage - best for construction and format conversion
    Coo(CooMatrix<B, T>),
    /// CSR storage - best for row traversal and matrix-vector products
    Csr(CsrMatrix<B, T>),
    /// CSC storage - best for column traversal
    Csc(CscMatrix<B, T>),
}

impl<B: Backend, T: Element> SparseMatrix<B, T> {
    /// Create from raw triplets in the requested storage format
    ///
    /// Duplicate (row, col) entries merge by summation in every format.
    pub fn from_triplets(
        format: SparseFormat,
        rows: &[i64],
        cols: &[i64],
        values: &[T],
        shape: [usize; 2],
    ) -> Result<Self> {
        Ok(match format {
            SparseFormat::Coo => {
                SparseMatrix::Coo(CooMatrix::from_triplets(rows, cols, values, shape)?)
            }
            SparseFormat::Csr => {
                SparseMatrix::Csr(CsrMatrix::from_triplets(rows, cols, values, shape)?)
            }
            SparseFormat::Csc => {
                SparseMatrix::Csc(CscMatrix::from_triplets(rows, cols, values, shape)?)
            }
        })
    }

    /// Create an empty matrix in the requested storage format
    pub fn empty(format: SparseFormat, shape: [usize; 2]) -> Self {
        match format {
            SparseFormat::Coo => SparseMatrix::Coo(CooMatrix::empty(shape)),
            SparseFormat::Csr => SparseMatrix::Csr(CsrMatrix::empty(shape)),
            SparseFormat::Csc => SparseMatrix::Csc(CscMatrix::empty(shape)),
        }
    }

    // =========================================================================
    // Format conversion
    // =========================================================================

    /// Convert to COO (no-op if already COO)
    pub fn to_coo(&self) -> Result<CooMatrix<B, T>> {
        match self {
            SparseMatrix::Coo(m) => Ok(m.clone()),
            SparseMatrix::Csr(m) => convert::csr_to_coo(m),
            SparseMatrix::Csc(m) => convert::csc_to_coo(m),
        }
    }

    /// Convert to CSR (no-op if already CSR)
    pub fn to_csr(&self) -> Result<CsrMatrix<B, T>> {
        match self {
            SparseMatrix::Coo(m) => convert::coo_to_csr(m),
            SparseMatrix::Csr(m) => Ok(m.clone()),
            SparseMatrix::Csc(m) => convert::csc_to_csr(m),
        }
    }

    /// Convert to CSC (no-op if already CSC)
    pub fn to_csc(&self) -> Result<CscMatrix<B, T>> {
        match self {
            SparseMatrix::Coo(m) => convert::coo_to_csc(m),
            SparseMatrix::Csr(m) => convert::csr_to_csc(m),
            SparseMatrix::Csc(m) => Ok(m.clone()),
        }
    }

    /// Convert to an arbitrary target format
    pub fn to_format(&self, target: SparseFormat) -> Result<Self> {
        Ok(match target {
            SparseFormat::Coo => SparseMatrix::Coo(self.to_coo()?),
            SparseFormat::Csr => SparseMatrix::Csr(self.to_csr()?),
            SparseFormat::Csc => SparseMatrix::Csc(self.to_csc()?),
        })
    }

    fn resolve_path(&self, op: Operation) -> Result<KernelPath> {
        resolve(self.format(), op).ok_or_else(|| Error::unsupported_pair(self.format(), op.name()))
    }

    /// Convert for a kernel path that has no direct implementation.
    ///
    /// The performance cliff the dispatch table documents: a full extra
    /// structural pass before the kernel proper. Never silent.
    fn convert_for(&self, op: Operation, target: SparseFormat) -> Result<Self> {
        log::debug!(
            "no direct {} kernel for {}; converting to {} (full structural pass)",
            op,
            self.format(),
            target
        );
        self.to_format(target)
    }

    // =========================================================================
    // Uniform operation entry points
    // =========================================================================

    /// Matrix-vector product: returns y = A * x as a fresh buffer
    pub fn matvec(&self, x: &B::Buffer<T>) -> Result<B::Buffer<T>> {
        match self.resolve_path(Operation::MatVec)? {
            KernelPath::Direct => match self {
                SparseMatrix::Coo(m) => ops::spmv_coo(m, x),
                SparseMatrix::Csr(m) => ops::spmv_csr(m, x),
                SparseMatrix::Csc(m) => ops::spmv_csc(m, x),
            },
            KernelPath::Convert(target) => {
                self.convert_for(Operation::MatVec, target)?.matvec(x)
            }
        }
    }

    /// Matrix-vector product into a caller-supplied output buffer
    pub fn matvec_into(&self, x: &B::Buffer<T>, y: &mut B::Buffer<T>) -> Result<()> {
        match self.resolve_path(Operation::MatVec)? {
            KernelPath::Direct => match self {
                SparseMatrix::Coo(m) => ops::spmv_coo_into(m, x, y),
                SparseMatrix::Csr(m) => ops::spmv_csr_into(m, x, y),
                SparseMatrix::Csc(m) => ops::spmv_csc_into(m, x, y),
            },
            KernelPath::Convert(target) => self
                .convert_for(Operation::MatVec, target)?
                .matvec_into(x, y),
        }
    }

    /// Matrix-matrix product: returns C = A * B as a fresh row-major buffer
    ///
    /// `b` is a dense row-major buffer with shape `b_shape`.
    pub fn matmat(&self, b: &B::Buffer<T>, b_shape: [usize; 2]) -> Result<B::Buffer<T>> {
        match self.resolve_path(Operation::MatMat)? {
            KernelPath::Direct => match self {
                SparseMatrix::Coo(m) => ops::spmm_coo(m, b, b_shape),
                SparseMatrix::Csr(m) => ops::spmm_csr(m, b, b_shape),
                SparseMatrix::Csc(m) => ops::spmm_csc(m, b, b_shape),
            },
            KernelPath::Convert(target) => self
                .convert_for(Operation::MatMat, target)?
                .matmat(b, b_shape),
        }
    }

    /// Matrix-matrix product into a caller-supplied output buffer
    pub fn matmat_into(
        &self,
        b: &B::Buffer<T>,
        b_shape: [usize; 2],
        c: &mut B::Buffer<T>,
    ) -> Result<()> {
        match self.resolve_path(Operation::MatMat)? {
            KernelPath::Direct => match self {
                SparseMatrix::Coo(m) => ops::spmm_coo_into(m, b, b_shape, c),
                SparseMatrix::Csr(m) => ops::spmm_csr_into(m, b, b_shape, c),
                SparseMatrix::Csc(m) => ops::spmm_csc_into(m, b, b_shape, c),
            },
            KernelPath::Convert(target) => self
                .convert_for(Operation::MatMat, target)?
                .matmat_into(b, b_shape, c),
        }
    }

    /// Three-argument dot: x' * A * y
    ///
    /// Fused for CSR and CSC; two-step for COO.
    pub fn dot3(&self, x: &B::Buffer<T>, y: &B::Buffer<T>) -> Result<T> {
        match self.resolve_path(Operation::Dot3)? {
            KernelPath::Direct => match self {
                SparseMatrix::Coo(m) => ops::dot3_coo(x, m, y),
                SparseMatrix::Csr(m) => ops::dot3_csr(x, m, y),
                SparseMatrix::Csc(m) => ops::dot3_csc(x, m, y),
            },
            KernelPath::Convert(target) => self.convert_for(Operation::Dot3, target)?.dot3(x, y),
        }
    }

    /// Sparse + dense addition: returns a fresh dense buffer, never
    /// aliasing `dense`
    pub fn add_dense(&self, dense: &B::Buffer<T>) -> Result<B::Buffer<T>> {
        match self.resolve_path(Operation::AddDense)? {
            KernelPath::Direct => match self {
                SparseMatrix::Coo(m) => ops::add_dense_coo(m, dense),
                SparseMatrix::Csr(m) => ops::add_dense_csr(m, dense),
                SparseMatrix::Csc(m) => ops::add_dense_csc(m, dense),
            },
            KernelPath::Convert(target) => self
                .convert_for(Operation::AddDense, target)?
                .add_dense(dense),
        }
    }

    /// Sparse + dense addition into the caller's dense buffer
    pub fn add_dense_assign(&self, dense: &mut B::Buffer<T>) -> Result<()> {
        match self.resolve_path(Operation::AddDense)? {
            KernelPath::Direct => match self {
                SparseMatrix::Coo(m) => ops::add_dense_coo_assign(m, dense),
                SparseMatrix::Csr(m) => ops::add_dense_csr_assign(m, dense),
                SparseMatrix::Csc(m) => ops::add_dense_csc_assign(m, dense),
            },
            KernelPath::Convert(target) => self
                .convert_for(Operation::AddDense, target)?
                .add_dense_assign(dense),
        }
    }
}

impl<B: Backend, T: Element> SparseStorage for SparseMatrix<B, T> {
    fn format(&self) -> SparseFormat {
        match self {
            SparseMatrix::Coo(m) => m.format(),
            SparseMatrix::Csr(m) => m.format(),
            SparseMatrix::Csc(m) => m.format(),
        }
    }

    fn shape(&self) -> [usize; 2] {
        match self {
            SparseMatrix::Coo(m) => m.shape(),
            SparseMatrix::Csr(m) => m.shape(),
            SparseMatrix::Csc(m) => m.shape(),
        }
    }

    fn nnz(&self) -> usize {
        match self {
            SparseMatrix::Coo(m) => m.nnz(),
            SparseMatrix::Csr(m) => m.nnz(),
            SparseMatrix::Csc(m) => m.nnz(),
        }
    }

    fn memory_usage(&self) -> usize {
        match self {
            SparseMatrix::Coo(m) => m.memory_usage(),
            SparseMatrix::Csr(m) => m.memory_usage(),
            SparseMatrix::Csc(m) => m.memory_usage(),
        }
    }
}

impl<B: Backend, T: Element> From<CooMatrix<B, T>> for SparseMatrix<B, T> {
    fn from(m: CooMatrix<B, T>) -> Self {
        SparseMatrix::Coo(m)
    }
}

impl<B: Backend, T: Element> From<CsrMatrix<B, T>> for SparseMatrix<B, T> {
    fn from(m: CsrMatrix<B, T>) -> Self {
        SparseMatrix::Csr(m)
    }
}

impl<B: Backend, T: Element> From<CscMatrix<B, T>> for SparseMatrix<B, T> {
    fn from(m: CscMatrix<B, T>) -> Self {
        SparseMatrix::Csc(m)
    }
}
