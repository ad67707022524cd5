pub mod amenity;
pub mod auth;
pub mod live;
pub mod notification;
pub mod reservation;
pub mod room;
pub mod suggestion;
pub mod user;

use chrono::NaiveDate;

// チェックアウトはチェックインより後の日付でなければならない
pub(crate) fn is_after(check_in: &NaiveDate) -> impl FnOnce(&NaiveDate, &()) -> garde::Result + '_ {
    move |check_out, _| {
        if check_out > check_in {
            Ok(())
        } else {
            Err(garde::Error::new("check-out must be after check-in"))
        }
    }
}
