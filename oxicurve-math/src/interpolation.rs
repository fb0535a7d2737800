//! Hermite interpolation through confluent divided differences.
//!
//! Every node contributes one value constraint plus any number of derivative
//! constraints. A node carrying `p` derivatives occupies `p + 1` consecutive
//! slots of the confluent multiset `Z`; inside such a block the divided
//! difference degenerates to a scaled derivative:
//!
//! ```text
//! f[z, z, ..., z] (k + 1 copies) = f^(k)(z) / k!
//! ```
//!
//! Outside a block the ordinary difference quotient is used. All arithmetic
//! is exact.
//!
//! ## References
//!
//! - "Numerical Analysis" (Burden & Faires, 2010), section 3.4
//! - "Interpolation and Approximation" (Davis, 1975), chapter II

use crate::error::{MathError, MathResult};
use crate::polynomial::Polynomial;
use crate::rational::factorials;
use num_rational::BigRational;
use num_traits::{One, Zero};
use rustc_hash::{FxHashMap, FxHashSet};

/// A 1-D interpolation node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Parameter value.
    pub time: BigRational,
    /// Imposed value at `time`.
    pub value: BigRational,
    /// `derivatives[i]` is the imposed `(i + 1)`-th derivative at `time`.
    pub derivatives: Vec<BigRational>,
}

impl Node {
    /// Create a new node.
    pub fn new(time: BigRational, value: BigRational, derivatives: Vec<BigRational>) -> Self {
        Self {
            time,
            value,
            derivatives,
        }
    }

    /// Create a node without derivative constraints.
    pub fn value_only(time: BigRational, value: BigRational) -> Self {
        Self::new(time, value, Vec::new())
    }

    /// Create from integers.
    pub fn from_ints(time: i64, value: i64, derivatives: &[i64]) -> Self {
        Self {
            time: BigRational::from_integer(time.into()),
            value: BigRational::from_integer(value.into()),
            derivatives: derivatives
                .iter()
                .map(|&d| BigRational::from_integer(d.into()))
                .collect(),
        }
    }

    /// Number of constraints imposed by this node (value plus derivatives).
    #[inline]
    pub fn constraint_count(&self) -> usize {
        1 + self.derivatives.len()
    }

    /// Imposed value of the `order`-th derivative (`0` is the value itself).
    pub fn constraint(&self, order: usize) -> Option<&BigRational> {
        match order {
            0 => Some(&self.value),
            k => self.derivatives.get(k - 1),
        }
    }
}

/// A node of a plane curve: both coordinates share the time and the
/// confluence structure, but carry independent values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveNode {
    /// Parameter value.
    pub time: BigRational,
    /// Imposed point `(x, y)` at `time`.
    pub point: (BigRational, BigRational),
    /// `derivatives[i]` is the imposed `(i + 1)`-th derivative vector at `time`.
    pub derivatives: Vec<(BigRational, BigRational)>,
}

impl CurveNode {
    /// Create a new curve node.
    pub fn new(
        time: BigRational,
        point: (BigRational, BigRational),
        derivatives: Vec<(BigRational, BigRational)>,
    ) -> Self {
        Self {
            time,
            point,
            derivatives,
        }
    }

    /// Create from integers.
    pub fn from_ints(time: i64, point: (i64, i64), derivatives: &[(i64, i64)]) -> Self {
        let r = |v: i64| BigRational::from_integer(v.into());
        Self {
            time: r(time),
            point: (r(point.0), r(point.1)),
            derivatives: derivatives.iter().map(|&(dx, dy)| (r(dx), r(dy))).collect(),
        }
    }

    /// The 1-D node carrying the first coordinate.
    pub fn x_node(&self) -> Node {
        Node::new(
            self.time.clone(),
            self.point.0.clone(),
            self.derivatives.iter().map(|d| d.0.clone()).collect(),
        )
    }

    /// The 1-D node carrying the second coordinate.
    pub fn y_node(&self) -> Node {
        Node::new(
            self.time.clone(),
            self.point.1.clone(),
            self.derivatives.iter().map(|d| d.1.clone()).collect(),
        )
    }
}

/// One entry of the confluent multiset: which node it repeats, and which
/// constraint order of that node it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    node: usize,
    order: usize,
}

/// The confluent node multiset `Z`, held as explicit `(node, order)` slots.
///
/// Slots of one node are contiguous and ordered by constraint order; node
/// times are pairwise distinct. Both facts are checked once, here.
#[derive(Debug, Clone)]
pub struct ConfluentNodes {
    times: Vec<BigRational>,
    slots: Vec<Slot>,
}

impl ConfluentNodes {
    /// Lay out `counts[i]` slots for `times[i]`, in the given order.
    pub fn new(times: Vec<BigRational>, counts: &[usize]) -> MathResult<Self> {
        if times.is_empty() {
            return Err(MathError::invalid_input("no interpolation nodes"));
        }
        if times.len() != counts.len() {
            return Err(MathError::invalid_input(format!(
                "{} times but {} constraint counts",
                times.len(),
                counts.len()
            )));
        }

        let mut seen: FxHashSet<&BigRational> = FxHashSet::default();
        for t in &times {
            if !seen.insert(t) {
                return Err(MathError::invalid_input(format!(
                    "duplicate node time {}",
                    t
                )));
            }
        }

        let mut slots = Vec::with_capacity(counts.iter().sum());
        for (node, &count) in counts.iter().enumerate() {
            if count == 0 {
                return Err(MathError::invalid_input(format!(
                    "node at time {} imposes no constraint",
                    times[node]
                )));
            }
            slots.extend((0..count).map(|order| Slot { node, order }));
        }

        Ok(Self { times, slots })
    }

    /// Number of slots, i.e. total number of constraints.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: a layout holds at least one slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Distinct node times, in caller order.
    #[inline]
    pub fn times(&self) -> &[BigRational] {
        &self.times
    }

    /// Time `Z[i]`.
    #[inline]
    pub fn time(&self, i: usize) -> &BigRational {
        &self.times[self.slots[i].node]
    }

    /// Index of the node repeated at slot `i`.
    #[inline]
    pub fn node_index(&self, i: usize) -> usize {
        self.slots[i].node
    }

    /// Constraint order slot `i` stands for.
    #[inline]
    pub fn order(&self, i: usize) -> usize {
        self.slots[i].order
    }

    /// True if slots `i` and `j` repeat the same node.
    #[inline]
    pub fn same_block(&self, i: usize, j: usize) -> bool {
        self.slots[i].node == self.slots[j].node
    }

    /// The multiset `Z` itself.
    pub fn abscissae(&self) -> impl Iterator<Item = &BigRational> + '_ {
        self.slots.iter().map(|s| &self.times[s.node])
    }
}

/// The full divided-difference table over a confluent layout.
///
/// `column(k)[i]` is `f[Z_i, ..., Z_{i+k}]`.
#[derive(Debug, Clone)]
pub struct DividedDifferences {
    layout: ConfluentNodes,
    columns: Vec<Vec<BigRational>>,
}

impl DividedDifferences {
    /// Build the table for nodes given in the desired order.
    ///
    /// The nodes are neither sorted nor deduplicated; duplicate times are an
    /// error.
    pub fn build(nodes: &[Node]) -> MathResult<Self> {
        let times = nodes.iter().map(|n| n.time.clone()).collect();
        let counts: Vec<usize> = nodes.iter().map(Node::constraint_count).collect();
        let layout = ConfluentNodes::new(times, &counts)?;
        Self::tabulate(layout, nodes)
    }

    /// Build the table from a time list plus value and derivative maps.
    ///
    /// A time without an entry in `derivatives` carries no derivative
    /// constraint; a time without an entry in `values` is an error.
    pub fn from_maps(
        times: &[BigRational],
        values: &FxHashMap<BigRational, BigRational>,
        derivatives: &FxHashMap<BigRational, Vec<BigRational>>,
    ) -> MathResult<Self> {
        let nodes = times
            .iter()
            .map(|t| {
                let value = values.get(t).cloned().ok_or_else(|| {
                    MathError::invalid_input(format!("no value given for time {}", t))
                })?;
                let derivs = derivatives.get(t).cloned().unwrap_or_default();
                Ok(Node::new(t.clone(), value, derivs))
            })
            .collect::<MathResult<Vec<_>>>()?;
        Self::build(&nodes)
    }

    fn tabulate(layout: ConfluentNodes, nodes: &[Node]) -> MathResult<Self> {
        let n = layout.len();
        let fact = factorials(n);

        let mut columns: Vec<Vec<BigRational>> = Vec::with_capacity(n);
        columns.push(
            (0..n)
                .map(|i| nodes[layout.node_index(i)].value.clone())
                .collect(),
        );

        for k in 1..n {
            let prev = &columns[k - 1];
            let mut column = Vec::with_capacity(n - k);

            for i in 0..(n - k) {
                let entry = if layout.same_block(i, i + k) {
                    // k steps inside one block: the block holds at least k
                    // derivatives of its node.
                    let node = &nodes[layout.node_index(i)];
                    &node.derivatives[k - 1] / BigRational::from_integer(fact[k].clone())
                } else {
                    let denominator = layout.time(i + k) - layout.time(i);
                    if denominator.is_zero() {
                        return Err(MathError::DivisionByZero(
                            "divided-difference denominator vanished",
                        ));
                    }
                    (&prev[i + 1] - &prev[i]) / denominator
                };
                column.push(entry);
            }

            columns.push(column);
        }

        Ok(Self { layout, columns })
    }

    /// The confluent layout the table was built over.
    #[inline]
    pub fn layout(&self) -> &ConfluentNodes {
        &self.layout
    }

    /// The confluent abscissae `Z_0, Z_1, ...`.
    pub fn abscissae(&self) -> impl Iterator<Item = &BigRational> + '_ {
        self.layout.abscissae()
    }

    /// Column `k` of the table.
    pub fn column(&self, k: usize) -> Option<&[BigRational]> {
        self.columns.get(k).map(Vec::as_slice)
    }

    /// Newton coefficients `f[Z_0], f[Z_0, Z_1], ..., f[Z_0, ..., Z_n]`.
    pub fn newton_coefficients(&self) -> Vec<BigRational> {
        self.columns
            .iter()
            .filter_map(|c| c.first().cloned())
            .collect()
    }

    /// Expand the Newton form into coefficient form.
    ///
    /// `H = c_0 + (t - Z_0)(c_1 + (t - Z_1)(c_2 + ...))`
    pub fn to_polynomial(&self) -> Polynomial {
        let coeffs = self.newton_coefficients();
        let mut result = Polynomial::zero();
        for (k, c) in coeffs.iter().enumerate().rev() {
            let factor = Polynomial::linear_factor(self.layout.time(k));
            result = &(&result * &factor) + &Polynomial::constant(c.clone());
        }
        result
    }
}

/// Hermite interpolation of 1-D nodes.
///
/// Returns the unique polynomial of minimal degree matching every value and
/// derivative constraint. Its degree is at most the number of constraints
/// minus one.
pub fn interpolate(nodes: &[Node]) -> MathResult<Polynomial> {
    Ok(DividedDifferences::build(nodes)?.to_polynomial())
}

/// Hermite interpolation from a time list plus value and derivative maps.
pub fn interpolate_maps(
    times: &[BigRational],
    values: &FxHashMap<BigRational, BigRational>,
    derivatives: &FxHashMap<BigRational, Vec<BigRational>>,
) -> MathResult<Polynomial> {
    Ok(DividedDifferences::from_maps(times, values, derivatives)?.to_polynomial())
}

/// Hermite interpolation of a plane curve, one independent run per coordinate.
pub fn interpolate_curve(nodes: &[CurveNode]) -> MathResult<(Polynomial, Polynomial)> {
    let xs: Vec<Node> = nodes.iter().map(CurveNode::x_node).collect();
    let ys: Vec<Node> = nodes.iter().map(CurveNode::y_node).collect();
    Ok((interpolate(&xs)?, interpolate(&ys)?))
}

/// Lagrange interpolation through points with distinct abscissae.
///
/// Formula: P(t) = Σᵢ yᵢ · Πⱼ≠ᵢ (t - xⱼ) / (xᵢ - xⱼ)
pub fn lagrange(points: &[(BigRational, BigRational)]) -> MathResult<Polynomial> {
    if points.is_empty() {
        return Err(MathError::invalid_input("no interpolation points"));
    }

    let mut result = Polynomial::zero();
    for (i, (x_i, y_i)) in points.iter().enumerate() {
        let mut basis = Polynomial::one();
        for (j, (x_j, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let denominator = x_i - x_j;
            if denominator.is_zero() {
                return Err(MathError::invalid_input(format!(
                    "duplicate abscissa {}",
                    x_i
                )));
            }
            basis = (&basis * &Polynomial::linear_factor(x_j))
                .scale(&(BigRational::one() / denominator));
        }
        result = &result + &basis.scale(y_i);
    }

    Ok(result)
}
