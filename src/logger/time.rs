use std::time::{SystemTime, UNIX_EPOCH};

fn unix_seconds() -> u64 {
    // A clock before 1970 is reported as the epoch rather than aborting a log call.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Returns the current local time in the format YYYY-MM-DD HH:MM:SS TZ
#[cfg(target_family = "unix")]
pub fn now() -> String {
    use std::ffi::CStr;

    let secs = unix_seconds() as libc::time_t;
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    let mut buf = [0 as libc::c_char; 64];

    unsafe {
        libc::localtime_r(&secs, &mut tm);
        let written = libc::strftime(
            buf.as_mut_ptr(),
            buf.len(),
            c"%Y-%m-%d %H:%M:%S %Z".as_ptr(),
            &tm,
        );
        if written == 0 {
            return secs.to_string();
        }
        CStr::from_ptr(buf.as_ptr()).to_string_lossy().into_owned()
    }
}

/// Returns the current local time in the format YYYY-MM-DD HH:MM:SS TZ
#[cfg(target_family = "windows")]
pub fn now() -> String {
    use windows_sys::Win32::System::Time::{GetTimeZoneInformation, TIME_ZONE_INFORMATION};
    use windows_sys::Win32::Foundation::SYSTEMTIME;

    let mut tm: SYSTEMTIME = unsafe { std::mem::zeroed() };
    let mut tz: TIME_ZONE_INFORMATION = unsafe { std::mem::zeroed() };
    unsafe {
        windows_sys::Win32::System::SystemInformation::GetLocalTime(&mut tm);
        GetTimeZoneInformation(&mut tz);
    }

    let tz_len = tz.StandardName.iter().position(|c| *c == 0).unwrap_or(0);
    let tz_name = String::from_utf16_lossy(&tz.StandardName[..tz_len]);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02} {}",
        tm.wYear, tm.wMonth, tm.wDay, tm.wHour, tm.wMinute, tm.wSecond, tz_name
    )
}
