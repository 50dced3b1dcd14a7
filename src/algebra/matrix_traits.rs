use crate::algebra::MatrixShape;

/// Dimension queries common to sparse, dense and adjoint matrices
pub trait ShapedMatrix {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn shape(&self) -> MatrixShape;
    fn size(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}
