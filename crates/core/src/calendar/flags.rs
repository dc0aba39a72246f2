//! Bit-flag sets for supported component types and CRUD permissions.
//!
//! Both sets travel as small integers on the wire. Internally they are
//! newtypes with named constants; raw integers only appear at the JSON
//! boundary through [`ComponentSet::bits`] / [`Permissions::code`] and the
//! truncating constructors.

macro_rules! flag_set {
    (
        $(#[$meta:meta])*
        $name:ident($repr:ty): $all:expr;
        $( $(#[$flag_meta:meta])* $flag:ident = $value:expr; )+
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name($repr);

        impl $name {
            $( $(#[$flag_meta])* pub const $flag: Self = Self($value); )+

            /// Every known flag.
            pub const ALL: Self = Self($all);

            /// The set with no flags.
            pub const fn empty() -> Self {
                Self(0)
            }

            /// Decodes an integer, silently dropping unknown bits.
            pub const fn from_bits_truncate(bits: i64) -> Self {
                Self((bits & ($all as i64)) as $repr)
            }

            /// The raw integer value.
            pub const fn bits(self) -> $repr {
                self.0
            }

            /// Returns true if every flag in `other` is also set in `self`.
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// Returns true if any flag in `other` is set in `self`.
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            /// Sets or clears the flags in `other` depending on `value`.
            pub fn set(&mut self, other: Self, value: bool) {
                if value {
                    self.0 |= other.0;
                } else {
                    self.0 &= !other.0;
                }
            }
        }

        impl ::std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }
    };
}

pub(crate) use flag_set;

flag_set! {
    /// Calendar object kinds a calendar may hold.
    ComponentSet(u8): 0b111;
    EVENT = 1;
    JOURNAL = 2;
    TODO = 4;
}

flag_set! {
    /// CRUD + share permissions on a calendar.
    ///
    /// Bit values follow the host platform's permission constants, so the
    /// combined code of all flags is 31.
    Permissions(u8): 0b1_1111;
    READ = 1;
    UPDATE = 2;
    CREATE = 4;
    DELETE = 8;
    SHARE = 16;
}

impl Permissions {
    /// Highest valid explicit permission code.
    pub const MAX_CODE: i64 = 31;

    /// Uses an explicit permission code if it lies in `0..=31`.
    pub fn from_code(code: i64) -> Option<Self> {
        (0..=Self::MAX_CODE)
            .contains(&code)
            .then(|| Self::from_bits_truncate(code))
    }

    /// The integer permission code.
    pub const fn code(self) -> u8 {
        self.bits()
    }
}
