//! Data structures exchanged with the Tourbook backend.

pub mod booking;
pub mod excursion;
pub mod review;
pub mod user;

pub use booking::{Booking, BookingCreate};
pub use excursion::{
    ActiveListQuery, Excursion, ExcursionCreate, ExcursionDetails, ExcursionDetailsCreate,
    ExcursionDetailsUpdate, ExcursionFullInfo, ExcursionImage, ExcursionListQuery,
    ExcursionUpdate, ImageUpload, ItineraryItem,
};
pub use review::{Review, ReviewCreate, ReviewStats};
pub use user::{LoginRequest, TokenResponse, User};
