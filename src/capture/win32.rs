//! Win32 window enumeration and visibility.

use super::WindowEntry;
use crate::error::LllmError;
use windows::core::PWSTR;
use windows::Win32::Foundation::{CloseHandle, BOOL, FALSE, HWND, LPARAM, TRUE};
use windows::Win32::System::Threading::{
    OpenProcess, QueryFullProcessImageNameW, PROCESS_NAME_FORMAT,
    PROCESS_QUERY_LIMITED_INFORMATION,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetShellWindow, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, IsWindowVisible, ShowWindow, SW_HIDE, SW_SHOW,
};

/// Visible, titled top-level windows, excluding the desktop shell.
pub fn list_visible_windows() -> Result<Vec<WindowEntry>, LllmError> {
    unsafe {
        let shell = GetShellWindow();
        let mut entries = Vec::new();
        for raw in collect_windows()? {
            let hwnd = HWND(raw as *mut _);
            if !IsWindowVisible(hwnd).as_bool() || hwnd == shell {
                continue;
            }
            let len = GetWindowTextLengthW(hwnd);
            if len <= 0 {
                continue;
            }
            let mut buf = vec![0u16; len as usize + 1];
            let copied = GetWindowTextW(hwnd, &mut buf);
            let title = String::from_utf16_lossy(&buf[..copied.max(0) as usize]);

            let mut pid: u32 = 0;
            GetWindowThreadProcessId(hwnd, Some(&mut pid));

            entries.push(WindowEntry {
                handle: raw,
                title,
                process_name: process_name(pid),
            });
        }
        Ok(entries)
    }
}

pub fn set_visible(window: &WindowEntry, visible: bool) -> Result<(), LllmError> {
    let hwnd = HWND(window.handle as *mut _);
    // Return value is the previous visibility, not a success flag.
    unsafe {
        let _ = ShowWindow(hwnd, if visible { SW_SHOW } else { SW_HIDE });
    }
    Ok(())
}

unsafe extern "system" fn enum_windows_cb(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let handles = &mut *(lparam.0 as *mut Vec<isize>);
    handles.push(hwnd.0 as isize);
    TRUE
}

unsafe fn collect_windows() -> Result<Vec<isize>, LllmError> {
    let mut handles: Vec<isize> = Vec::new();
    EnumWindows(
        Some(enum_windows_cb),
        LPARAM(&mut handles as *mut Vec<isize> as isize),
    )
    .map_err(|e| LllmError::Capture(format!("EnumWindows failed: {}", e)))?;
    Ok(handles)
}

/// Executable name without directory or `.exe`; empty if the process is gone.
unsafe fn process_name(pid: u32) -> String {
    if pid == 0 {
        return String::new();
    }
    let handle = match OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, FALSE, pid) {
        Ok(h) => h,
        Err(_) => return String::new(),
    };
    let mut buf = [0u16; 260];
    let mut len = buf.len() as u32;
    let ok = QueryFullProcessImageNameW(
        handle,
        PROCESS_NAME_FORMAT(0),
        PWSTR(buf.as_mut_ptr()),
        &mut len,
    );
    let _ = CloseHandle(handle);
    if ok.is_err() {
        return String::new();
    }
    let path = String::from_utf16_lossy(&buf[..len as usize]);
    let file = path.rsplit('\\').next().unwrap_or("");
    file.strip_suffix(".exe")
        .or_else(|| file.strip_suffix(".EXE"))
        .unwrap_or(file)
        .to_string()
}
