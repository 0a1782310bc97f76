use std::marker::PhantomData;

use time::OffsetDateTime;

// Timestamps are tagged with their owning entity so a `CreatedAt<Book>` can
// never be handed to a `Person`.
macro_rules! timestamp {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name<T>(OffsetDateTime, PhantomData<T>);

        impl<T> $name<T> {
            pub fn new(time: impl Into<OffsetDateTime>) -> Self {
                Self(time.into(), PhantomData)
            }
        }

        impl<T> AsRef<OffsetDateTime> for $name<T> {
            fn as_ref(&self) -> &OffsetDateTime {
                &self.0
            }
        }

        impl<T> From<$name<T>> for OffsetDateTime {
            fn from(value: $name<T>) -> Self {
                value.0
            }
        }
    };
}

timestamp!(CreatedAt);
timestamp!(UpdatedAt);
timestamp!(DeletedAt);

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use time::OffsetDateTime;

    use super::{CreatedAt, DeletedAt};

    #[derive(Debug, PartialEq)]
    struct Marker;

    #[test]
    fn keeps_the_instant() {
        let at = datetime!(2024-03-01 12:30:00 +09:00);
        let created = CreatedAt::<Marker>::new(at);
        assert_eq!(created.as_ref(), &at);
        assert_eq!(OffsetDateTime::from(created), at);
        assert_ne!(
            DeletedAt::<Marker>::new(at),
            DeletedAt::new(datetime!(2024-03-01 12:30:01 +09:00))
        );
    }
}
