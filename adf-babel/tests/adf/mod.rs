//! Document tree tests
//!
//! Wire-format decoding and the total-coverage guarantee of both serializers.

mod coverage;
mod wire;
