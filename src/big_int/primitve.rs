use itertools::Either;

pub trait Primitive: Copy + Eq + Ord {
    type Pos: UNum<Neg = Self::Neg>;
    type Neg: INum<Pos = Self::Pos>;

    fn to_le_bytes(self) -> impl ExactSizeIterator<Item = u8> + DoubleEndedIterator;

    fn select_sign(self) -> Either<Self::Pos, Self::Neg>;
}
pub trait UNum: Primitive {}
pub trait INum: Primitive {
    fn is_negative(self) -> bool;
    /// the absolute value, widened so `MIN` stays representable
    fn abs(self) -> Self::Pos;
}

macro_rules! implPrim {
    ($pos_type: tt, $neg_type: tt) => {
        impl Primitive for $pos_type {
            type Pos = $pos_type;
            type Neg = $neg_type;

            fn to_le_bytes(self) -> impl ExactSizeIterator<Item = u8> + DoubleEndedIterator {
                self.to_le_bytes().into_iter()
            }
            fn select_sign(self) -> Either<Self::Pos, Self::Neg> {
                Either::Left(self)
            }
        }
        impl Primitive for $neg_type {
            type Pos = $pos_type;
            type Neg = $neg_type;

            fn to_le_bytes(self) -> impl ExactSizeIterator<Item = u8> + DoubleEndedIterator {
                self.to_le_bytes().into_iter()
            }
            fn select_sign(self) -> Either<Self::Pos, Self::Neg> {
                Either::Right(self)
            }
        }
        impl UNum for $pos_type {}
        impl INum for $neg_type {
            fn is_negative(self) -> bool {
                self.is_negative()
            }
            fn abs(self) -> $pos_type {
                self.unsigned_abs()
            }
        }
    };
}

implPrim!(u8, i8);
implPrim!(u16, i16);
implPrim!(u32, i32);
implPrim!(u64, i64);
