//! Element storage and lifecycle.
//!
//! An [`Elem`] carries no ring of its own; every operation that needs to
//! interpret it takes the ring as an argument. Polynomial elements own a
//! [`PolyBuf`], whose slots past the logical length are always initialised
//! zeros of the coefficient ring, so growing the length never exposes
//! stale data.

use std::fmt;
use std::mem;

use num_traits::{One, Zero};
use strata_integers::Integer;

use crate::ring::Ring;
use crate::{dispatch, fatal, frac};

/// An element of some ring in a tower.
///
/// `==` compares representations. Use [`Elem::equal`] for ring equality,
/// which treats `1/2` and `2/4` as the same fraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Elem {
    /// Integers, and residues of a quotient over the integers.
    Integer(Integer),
    /// Machine words, and residues of a quotient over machine words.
    Word(u64),
    /// Polynomials, and residues of a quotient over a polynomial ring.
    Poly(PolyBuf),
    /// Fractions.
    Frac(Box<FracElem>),
}

/// Numerator and denominator of a fraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FracElem {
    num: Elem,
    den: Elem,
}

impl FracElem {
    /// Creates a fraction from its parts.
    #[must_use]
    pub fn new(num: Elem, den: Elem) -> Self {
        Self { num, den }
    }

    /// The numerator.
    #[must_use]
    pub fn num(&self) -> &Elem {
        &self.num
    }

    /// The denominator.
    #[must_use]
    pub fn den(&self) -> &Elem {
        &self.den
    }

    /// Mutable access to the numerator.
    pub fn num_mut(&mut self) -> &mut Elem {
        &mut self.num
    }

    /// Mutable access to the denominator.
    pub fn den_mut(&mut self) -> &mut Elem {
        &mut self.den
    }

    /// Mutable access to both parts at once.
    pub fn parts_mut(&mut self) -> (&mut Elem, &mut Elem) {
        (&mut self.num, &mut self.den)
    }

    /// Consumes the fraction, returning `(num, den)`.
    #[must_use]
    pub fn into_parts(self) -> (Elem, Elem) {
        (self.num, self.den)
    }
}

/// Growable coefficient buffer of a polynomial element.
///
/// `alloc()` slots are initialised; the first `len()` are the coefficients,
/// the rest are zero.
#[derive(Clone, Debug, Default)]
pub struct PolyBuf {
    coeffs: Vec<Elem>,
    length: usize,
}

impl PolyBuf {
    /// Creates the zero polynomial without allocating.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalised polynomial from its coefficients, constant term
    /// first.
    #[must_use]
    pub fn from_coeffs(coeffs: Vec<Elem>) -> Self {
        let mut buf = Self {
            length: coeffs.len(),
            coeffs,
        };
        buf.normalise();
        buf
    }

    /// Number of coefficients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// True for the zero polynomial.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of initialised slots.
    #[must_use]
    pub fn alloc(&self) -> usize {
        self.coeffs.len()
    }

    /// The coefficients, constant term first.
    #[must_use]
    pub fn coeffs(&self) -> &[Elem] {
        &self.coeffs[..self.length]
    }

    /// Mutable coefficients. Callers that may zero the leading coefficient
    /// must call [`PolyBuf::normalise`] afterwards.
    pub fn coeffs_mut(&mut self) -> &mut [Elem] {
        &mut self.coeffs[..self.length]
    }

    /// All allocated slots, including the zero slots past the length.
    pub fn slots_mut(&mut self) -> &mut [Elem] {
        &mut self.coeffs
    }

    /// The leading coefficient, if any.
    #[must_use]
    pub fn lead(&self) -> Option<&Elem> {
        self.coeffs().last()
    }

    /// Coefficient `i`, if below the length.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&Elem> {
        self.coeffs().get(i)
    }

    /// Ensures at least `len` slots exist, growing geometrically.
    pub fn fit_length(&mut self, len: usize, coeff_ring: &Ring) {
        let alloc = self.coeffs.len();
        if len > alloc {
            let new_alloc = len.max(2 * alloc);
            self.coeffs.resize_with(new_alloc, || Elem::init(coeff_ring));
        }
    }

    /// Sets the logical length, zeroing any coefficients it drops.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the allocation.
    pub fn set_length(&mut self, len: usize, coeff_ring: &Ring) {
        assert!(len <= self.coeffs.len(), "set_length past allocation");
        if len < self.length {
            for c in &mut self.coeffs[len..self.length] {
                c.zero(coeff_ring);
            }
        }
        self.length = len;
    }

    /// Strips zero leading coefficients.
    pub fn normalise(&mut self) {
        while self.length > 0 && self.coeffs[self.length - 1].is_zero() {
            self.length -= 1;
        }
    }

    /// Keeps only the first `len` coefficients.
    pub fn truncate(&mut self, len: usize, coeff_ring: &Ring) {
        if len < self.length {
            self.set_length(len, coeff_ring);
            self.normalise();
        }
    }

    /// Replaces the contents with `coeffs` and normalises.
    pub(crate) fn load(&mut self, coeffs: Vec<Elem>) {
        *self = Self::from_coeffs(coeffs);
    }

    /// Consumes the buffer, returning the coefficients.
    #[must_use]
    pub fn into_coeffs(mut self) -> Vec<Elem> {
        self.coeffs.truncate(self.length);
        self.coeffs
    }
}

impl PartialEq for PolyBuf {
    fn eq(&self, other: &Self) -> bool {
        self.coeffs() == other.coeffs()
    }
}

impl Eq for PolyBuf {}

#[cold]
fn shape_mismatch(expected: &str, found: &Elem) -> ! {
    panic!("expected {expected} element, found {found:?}")
}

impl Elem {
    /// Creates the zero element of `ring`.
    ///
    /// Fractions start as `0 / 1`.
    #[must_use]
    pub fn init(ring: &Ring) -> Elem {
        match ring {
            Ring::Integer => Elem::Integer(Integer::zero()),
            Ring::MachineWord => Elem::Word(0),
            Ring::Quotient { base, .. } => Elem::init(base),
            Ring::Fraction { numer, denom } => Elem::Frac(Box::new(FracElem::new(
                Elem::init(numer),
                Elem::one_of(denom),
            ))),
            Ring::Polynomial { .. } => Elem::Poly(PolyBuf::new()),
        }
    }

    /// The multiplicative identity of `ring`.
    #[must_use]
    pub fn one_of(ring: &Ring) -> Elem {
        let mut x = Elem::init(ring);
        x.one(ring);
        x
    }

    /// The image of `v` in `ring`.
    #[must_use]
    pub fn from_si(v: i64, ring: &Ring) -> Elem {
        let mut x = Elem::init(ring);
        x.set_si(v, ring);
        x
    }

    /// A polynomial of `ring` with small integer coefficients, constant
    /// term first.
    #[must_use]
    pub fn poly_from_si(coeffs: &[i64], ring: &Ring) -> Elem {
        let Ring::Polynomial { coeff } = ring else {
            fatal::not_implemented("poly_from_si", ring)
        };
        Elem::Poly(PolyBuf::from_coeffs(
            coeffs.iter().map(|&c| Elem::from_si(c, coeff)).collect(),
        ))
    }

    /// A fraction element from its parts.
    #[must_use]
    pub fn fraction(num: Elem, den: Elem) -> Elem {
        Elem::Frac(Box::new(FracElem::new(num, den)))
    }

    /// Releases owned storage, leaving the zero element of `ring`.
    pub fn clear(&mut self, ring: &Ring) {
        *self = Elem::init(ring);
    }

    /// Sets `self` to zero, keeping polynomial storage.
    pub fn zero(&mut self, ring: &Ring) {
        match ring {
            Ring::Integer => *self = Elem::Integer(Integer::zero()),
            Ring::MachineWord => *self = Elem::Word(0),
            Ring::Quotient { base, .. } => self.zero(base),
            Ring::Fraction { numer, denom } => {
                let (num, den) = self.frac_mut(ring).parts_mut();
                num.zero(numer);
                den.one(denom);
            }
            Ring::Polynomial { coeff } => self.poly_mut().set_length(0, coeff),
        }
    }

    /// Sets `self` to one.
    pub fn one(&mut self, ring: &Ring) {
        match ring {
            Ring::Integer => *self = Elem::Integer(Integer::one()),
            Ring::MachineWord => *self = Elem::Word(1),
            Ring::Quotient { base, .. } => {
                self.one(base);
                dispatch::reduce(self, ring);
            }
            Ring::Fraction { numer, denom } => {
                let (num, den) = self.frac_mut(ring).parts_mut();
                num.one(numer);
                den.one(denom);
            }
            Ring::Polynomial { coeff } => {
                let buf = self.poly_mut();
                buf.set_length(0, coeff);
                buf.fit_length(1, coeff);
                buf.slots_mut()[0].one(coeff);
                buf.set_length(1, coeff);
                buf.normalise();
            }
        }
    }

    /// Sets `self` to `src`, reusing storage.
    pub fn set(&mut self, src: &Elem, ring: &Ring) {
        debug_assert!(src.belongs_to(ring), "element does not belong to {ring}");
        self.clone_from(src);
    }

    /// Sets `self` to the image of `v`.
    pub fn set_si(&mut self, v: i64, ring: &Ring) {
        match ring {
            Ring::Integer => *self = Elem::Integer(Integer::new(v)),
            Ring::MachineWord => *self = Elem::Word(v as u64),
            Ring::Quotient { base, nmod, .. } => match (&**base, nmod) {
                (Ring::MachineWord, Some(m)) => *self = Elem::Word(m.red_signed(v)),
                _ => {
                    self.set_si(v, base);
                    dispatch::reduce(self, ring);
                }
            },
            Ring::Fraction { numer, denom } => {
                let (num, den) = self.frac_mut(ring).parts_mut();
                num.set_si(v, numer);
                den.one(denom);
            }
            Ring::Polynomial { coeff } => {
                let buf = self.poly_mut();
                buf.set_length(0, coeff);
                if v != 0 {
                    buf.fit_length(1, coeff);
                    buf.slots_mut()[0].set_si(v, coeff);
                    buf.set_length(1, coeff);
                    buf.normalise();
                }
            }
        }
    }

    /// Sets coefficient `index` of a polynomial to the image of `v`.
    pub fn set_coeff_si(&mut self, index: usize, v: i64, ring: &Ring) {
        let Ring::Polynomial { coeff } = ring else {
            fatal::not_implemented("set_coeff_si", ring)
        };
        let buf = self.poly_mut();
        buf.fit_length(index + 1, coeff);
        if index >= buf.len() {
            buf.set_length(index + 1, coeff);
        }
        buf.slots_mut()[index].set_si(v, coeff);
        buf.normalise();
    }

    /// True for the zero element. Needs no ring: every ring's zero has a
    /// unique representation.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Elem::Integer(v) => v.is_zero(),
            Elem::Word(w) => *w == 0,
            Elem::Poly(p) => p.is_empty(),
            Elem::Frac(f) => f.num.is_zero(),
        }
    }

    /// True for the multiplicative identity of `ring`.
    #[must_use]
    pub fn is_one(&self, ring: &Ring) -> bool {
        self.equal(&Elem::one_of(ring), ring)
    }

    /// Ring equality: exact for scalars, coefficient-wise for polynomials,
    /// cross-multiplied for fractions.
    #[must_use]
    pub fn equal(&self, other: &Elem, ring: &Ring) -> bool {
        match ring {
            Ring::Integer | Ring::MachineWord => self == other,
            Ring::Quotient { base, .. } => self.equal(other, base),
            Ring::Fraction { .. } => frac::equal(self.frac(), other.frac(), ring),
            Ring::Polynomial { coeff } => {
                let (a, b) = (self.poly().coeffs(), other.poly().coeffs());
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equal(y, coeff))
            }
        }
    }

    /// Exchanges two elements without copying their storage.
    pub fn swap(&mut self, other: &mut Elem) {
        mem::swap(self, other);
    }

    /// True if the element has the shape `ring` expects.
    #[must_use]
    pub fn belongs_to(&self, ring: &Ring) -> bool {
        match (ring, self) {
            (Ring::Integer, Elem::Integer(_)) | (Ring::MachineWord, Elem::Word(_)) => true,
            (Ring::Quotient { base, .. }, x) => x.belongs_to(base),
            (Ring::Fraction { numer, denom }, Elem::Frac(f)) => {
                f.num.belongs_to(numer) && f.den.belongs_to(denom)
            }
            (Ring::Polynomial { coeff }, Elem::Poly(p)) => {
                p.coeffs().iter().all(|c| c.belongs_to(coeff))
            }
            _ => false,
        }
    }

    /// The integer inside an integer or integer-residue element.
    ///
    /// # Panics
    ///
    /// Panics if the element is not an integer.
    #[must_use]
    pub fn integer(&self) -> &Integer {
        match self {
            Elem::Integer(v) => v,
            _ => shape_mismatch("an integer", self),
        }
    }

    /// The word inside a machine-word or word-residue element.
    ///
    /// # Panics
    ///
    /// Panics if the element is not a word.
    #[must_use]
    pub fn word(&self) -> u64 {
        match self {
            Elem::Word(w) => *w,
            _ => shape_mismatch("a word", self),
        }
    }

    /// The buffer of a polynomial element.
    ///
    /// # Panics
    ///
    /// Panics if the element is not a polynomial.
    #[must_use]
    pub fn poly(&self) -> &PolyBuf {
        match self {
            Elem::Poly(p) => p,
            _ => shape_mismatch("a polynomial", self),
        }
    }

    /// The parts of a fraction element.
    ///
    /// # Panics
    ///
    /// Panics if the element is not a fraction.
    #[must_use]
    pub fn frac(&self) -> &FracElem {
        match self {
            Elem::Frac(f) => f,
            _ => shape_mismatch("a fraction", self),
        }
    }

    /// The polynomial buffer, turning `self` into an empty polynomial first
    /// if it has another shape.
    pub(crate) fn poly_mut(&mut self) -> &mut PolyBuf {
        if !matches!(self, Elem::Poly(_)) {
            *self = Elem::Poly(PolyBuf::new());
        }
        match self {
            Elem::Poly(p) => p,
            _ => unreachable!(),
        }
    }

    /// The fraction parts, turning `self` into `0 / 1` first if it has
    /// another shape.
    pub(crate) fn frac_mut(&mut self, ring: &Ring) -> &mut FracElem {
        if !matches!(self, Elem::Frac(_)) {
            *self = Elem::init(ring);
        }
        match self {
            Elem::Frac(f) => f,
            _ => unreachable!(),
        }
    }
}

impl From<Integer> for Elem {
    fn from(value: Integer) -> Self {
        Elem::Integer(value)
    }
}

impl From<u64> for Elem {
    fn from(value: u64) -> Self {
        Elem::Word(value)
    }
}

impl fmt::Display for Elem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Elem::Integer(v) => write!(f, "{v}"),
            Elem::Word(w) => write!(f, "{w}"),
            Elem::Poly(p) => {
                write!(f, "[")?;
                for (i, c) in p.coeffs().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, "]")
            }
            Elem::Frac(q) => write!(f, "{}/{}", q.num, q.den),
        }
    }
}

/// Copies `src` into `res` slot by slot.
pub fn vec_set(res: &mut [Elem], src: &[Elem]) {
    debug_assert_eq!(res.len(), src.len());
    for (r, s) in res.iter_mut().zip(src) {
        r.clone_from(s);
    }
}

/// Sets every slot of `res` to zero.
pub fn vec_zero(res: &mut [Elem], ring: &Ring) {
    for r in res {
        r.zero(ring);
    }
}

/// `res[i] = -src[i]`.
pub fn vec_neg(res: &mut [Elem], src: &[Elem], ring: &Ring) {
    debug_assert_eq!(res.len(), src.len());
    for (r, s) in res.iter_mut().zip(src) {
        dispatch::neg(r, s, ring);
    }
}

/// `res[i] = vec[i] * c`.
pub fn vec_scalar_mul(res: &mut [Elem], vec: &[Elem], c: &Elem, ring: &Ring) {
    debug_assert_eq!(res.len(), vec.len());
    for (r, v) in res.iter_mut().zip(vec) {
        dispatch::mul(r, v, c, ring);
    }
}

/// `res[i] += vec[i] * c`.
pub fn vec_scalar_addmul(res: &mut [Elem], vec: &[Elem], c: &Elem, ring: &Ring) {
    debug_assert_eq!(res.len(), vec.len());
    let mut t = Elem::init(ring);
    for (r, v) in res.iter_mut().zip(vec) {
        dispatch::mul(&mut t, v, c, ring);
        dispatch::add_assign(r, &t, ring);
    }
}

/// `res[i] -= vec[i] * c`.
pub fn vec_scalar_submul(res: &mut [Elem], vec: &[Elem], c: &Elem, ring: &Ring) {
    debug_assert_eq!(res.len(), vec.len());
    let mut t = Elem::init(ring);
    for (r, v) in res.iter_mut().zip(vec) {
        dispatch::mul(&mut t, v, c, ring);
        dispatch::sub_assign(r, &t, ring);
    }
}
