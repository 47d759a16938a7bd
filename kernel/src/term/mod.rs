//! The kernel text terminal: an in-memory VT-style character grid with a
//! circular scrollback, sitting between the kernel's formatted-print paths
//! ([`crate::printk`]) and a pluggable [`VideoBackend`]. All mutation of the
//! grid, cursor, and backend happens inside the single active drainer of
//! the [`ActionQueue`] — see that module for the re-entrant enqueue/drain
//! contract this relies on instead of a lock.
//!
//! Deliberately out of scope here: escape-sequence parsing (delegated to an
//! optional [`Filter`]), input/keyboard handling, and multiplexing more
//! than one active terminal.

pub mod backend;
pub mod cell;
pub mod color;
pub mod config;
pub mod fb_backend;
pub mod filter;
pub mod font8x8;
pub mod queue;
pub mod raw_buffer;
pub mod scrollback;
pub mod tabmap;
pub mod vga_backend;

use core::{
    cell::UnsafeCell,
    mem::MaybeUninit,
    sync::atomic::{AtomicBool, Ordering},
};

use alloc::boxed::Box;

pub use backend::{NullBackend, VideoBackend};
pub use cell::Cell;
pub use color::{Color, ColorCode};
pub use config::TerminalConfig;
pub use filter::{Filter, FilterAction};
use queue::{Action, ActionQueue};
use scrollback::Scrollback;
use tabmap::TabMap;

/// Failsafe scrollback storage, used only when dynamic allocation is
/// unavailable (panic-time init, or the real allocation failed). 80x25 is
/// the standard VGA text mode; the failsafe path carries no extra
/// scrollback rows.
const FAILSAFE_ROWS: usize = 25;
const FAILSAFE_COLS: usize = 80;

static mut FAILSAFE_CELLS: [Cell; FAILSAFE_ROWS * FAILSAFE_COLS] =
    [Cell::BLANK; FAILSAFE_ROWS * FAILSAFE_COLS];

struct TerminalCell(UnsafeCell<MaybeUninit<Terminal>>);

// SAFETY: all mutable access to the contained `Terminal` happens only from
// within the single active drainer of `QUEUE`, which the action queue's
// "was the ring empty before this insertion" protocol guarantees is never
// more than one context at a time.
unsafe impl Sync for TerminalCell {}

static TERMINAL: TerminalCell = TerminalCell(UnsafeCell::new(MaybeUninit::uninit()));
static TERMINAL_READY: AtomicBool = AtomicBool::new(false);
static QUEUE: ActionQueue = ActionQueue::new();

/// Mutable terminal state: the grid, cursor, viewport, and the backend it
/// draws through. See the module docs for why this is not behind a mutex.
struct Terminal {
    backend: Box<dyn VideoBackend>,
    /// Backend saved by `pause_output`, restored by `resume_output`.
    saved_backend: Option<Box<dyn VideoBackend>>,
    scrollback: Scrollback,
    tabmap: Option<TabMap>,
    filter: Option<Filter>,
    rows: usize,
    cols: usize,
    r: usize,
    c: usize,
    col_offset: usize,
    tab_size: usize,
    current_color: ColorCode,
    extra_rows: usize,
    max_scroll: usize,
    scroll: usize,
    use_serial: bool,
}

impl Terminal {
    fn blank_cell(&self) -> Cell {
        Cell::blank(self.current_color)
    }

    fn redraw_viewport(&mut self) {
        for row in 0..self.rows {
            let phys = self.scrollback.physical_row(self.scroll, row);
            let cells: alloc::vec::Vec<Cell> = self.scrollback.row(phys).to_vec();
            self.backend.set_row(row, &cells, row == self.rows - 1);
        }
        self.backend.flush_buffers();
    }

    fn set_scroll(&mut self, req: usize) {
        let floor = self.max_scroll.saturating_sub(self.extra_rows);
        let clamped = req.clamp(floor, self.max_scroll);
        if clamped == self.scroll {
            return;
        }
        self.scroll = clamped;
        self.redraw_viewport();
    }

    fn scroll_up(&mut self, n: usize) {
        self.set_scroll(self.scroll.saturating_sub(n.min(self.scroll)));
    }

    fn scroll_down(&mut self, n: usize) {
        self.set_scroll(self.scroll.saturating_add(n));
    }

    fn scroll_to_bottom(&mut self) {
        self.set_scroll(self.max_scroll);
    }

    /// Non-buffered scroll: physically shift the content currently in the
    /// viewport, independent of `scroll`/`max_scroll`. Distinct from
    /// `scroll_up`/`scroll_down`, which move the viewport over unchanged
    /// history; this overwrites viewport rows in place, the way the
    /// original's standalone non-buffered scroll actions do.
    fn non_buf_scroll_up(&mut self, n: usize) {
        let blank = self.blank_cell();
        self.scrollback.shift_up(self.scroll, self.rows, n, blank);
        self.redraw_viewport();
    }

    fn non_buf_scroll_down(&mut self, n: usize) {
        let blank = self.blank_cell();
        self.scrollback.shift_down(self.scroll, self.rows, n, blank);
        self.redraw_viewport();
    }

    fn incr_row(&mut self) {
        self.col_offset = 0;
        if self.r < self.rows - 1 {
            self.r += 1;
        } else {
            self.max_scroll += 1;
            if self.backend.scroll_one_line_up() {
                self.scroll += 1;
            } else {
                self.set_scroll(self.max_scroll);
            }
            let blank = self.blank_cell();
            self.scrollback.clear_row_at(self.scroll, self.rows - 1, blank);
            self.backend.clear_row(self.rows - 1, blank);
        }
    }

    fn write_printable(&mut self, ch: u8, color: ColorCode) {
        let cell = Cell::new(ch, color);
        self.scrollback.set_cell(self.scroll, self.r, self.c, cell);
        self.backend.set_cell(self.r, self.c, cell);
        self.c += 1;
    }

    fn write_tab(&mut self, color: ColorCode) {
        if self.tabmap.is_none() {
            if self.c < self.cols - 1 {
                self.write_printable(b' ', color);
            }
            return;
        }
        let rounded = ((self.c + 1 + self.tab_size - 1) / self.tab_size) * self.tab_size;
        let next = rounded.min(self.cols - 2);
        if let Some(map) = self.tabmap.as_mut() {
            map.set(self.r, next, true);
        }
        self.c = next + 1;
    }

    fn write_backspace(&mut self, color: ColorCode) {
        if self.c == 0 || self.c <= self.col_offset {
            return;
        }
        self.c -= 1;
        let on_tab_mark = self
            .tabmap
            .as_ref()
            .map(|m| m.get(self.r, self.c))
            .unwrap_or(false);
        if !on_tab_mark {
            let blank = Cell::blank(color);
            self.scrollback.set_cell(self.scroll, self.r, self.c, blank);
            self.backend.set_cell(self.r, self.c, blank);
            return;
        }
        if let Some(map) = self.tabmap.as_mut() {
            map.set(self.r, self.c, false);
        }
        let mut steps = 0;
        while steps < self.tab_size - 1 {
            if self.c == 0 || self.c == self.col_offset {
                break;
            }
            let prev_is_tab = self
                .tabmap
                .as_ref()
                .map(|m| m.get(self.r, self.c - 1))
                .unwrap_or(false);
            if prev_is_tab {
                break;
            }
            self.c -= 1;
            steps += 1;
        }
    }

    fn write_char(&mut self, ch: u8, color: ColorCode) {
        match ch {
            b'\n' => {
                self.c = 0;
                self.incr_row();
            }
            b'\r' => self.c = 0,
            b'\t' => self.write_tab(color),
            0x08 => self.write_backspace(color),
            _ => {
                if self.c == self.cols {
                    self.c = 0;
                    self.incr_row();
                }
                self.write_printable(ch, color);
            }
        }
    }

    fn process_write_batch(&mut self, bytes: &[u8], color: ColorCode) {
        self.scroll_to_bottom();
        self.backend.enable_cursor();
        let filter = self.filter;
        for &byte in bytes {
            if self.use_serial {
                crate::serial::write_byte(byte);
            }
            match filter {
                Some(filter) => {
                    let mut ch = byte;
                    let mut col = color;
                    let action =
                        filter.invoke(&mut ch, &mut col, &mut |c, col| self.write_char(c, col));
                    if action == FilterAction::WriteC {
                        self.write_char(ch, col);
                    }
                }
                None => self.write_char(byte, color),
            }
        }
        self.backend.move_cursor(self.r, self.c);
        self.backend.flush_buffers();
    }

    fn erase_in_line(&mut self, mode: u8) {
        let blank = self.blank_cell();
        match mode {
            0 => {
                for col in self.c..self.cols {
                    self.scrollback.set_cell(self.scroll, self.r, col, blank);
                    self.backend.set_cell(self.r, col, blank);
                }
            }
            1 => {
                for col in 0..self.c {
                    self.scrollback.set_cell(self.scroll, self.r, col, blank);
                    self.backend.set_cell(self.r, col, blank);
                }
            }
            2 => self.clear_full_row(self.r, blank),
            _ => {}
        }
    }

    fn clear_full_row(&mut self, row: usize, blank: Cell) {
        for col in 0..self.cols {
            self.scrollback.set_cell(self.scroll, row, col, blank);
        }
        self.backend.clear_row(row, blank);
    }

    fn erase_in_display(&mut self, mode: u8) {
        let blank = self.blank_cell();
        match mode {
            0 => {
                self.erase_in_line(0);
                for row in self.r + 1..self.rows {
                    self.clear_full_row(row, blank);
                }
            }
            1 => {
                for row in 0..self.r {
                    self.clear_full_row(row, blank);
                }
                self.erase_in_line(1);
            }
            2 => {
                for row in 0..self.rows {
                    self.clear_full_row(row, blank);
                }
            }
            3 => {
                for row in 0..self.rows {
                    self.clear_full_row(row, blank);
                }
                self.scroll = 0;
                self.max_scroll = 0;
                if let Some(map) = self.tabmap.as_mut() {
                    map.clear_all();
                }
                let (r, c) = (self.r, self.c);
                self.backend.move_cursor(r, c);
            }
            _ => {}
        }
    }

    fn pause_output(&mut self) {
        if self.saved_backend.is_none() {
            let null: Box<dyn VideoBackend> = Box::new(NullBackend);
            let current = core::mem::replace(&mut self.backend, null);
            self.saved_backend = Some(current);
        }
    }

    fn resume_output(&mut self) {
        if let Some(saved) = self.saved_backend.take() {
            self.backend = saved;
            self.redraw_viewport();
            self.backend.redraw_static_elements();
        }
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Write { data, len, color } => {
                self.process_write_batch(&data[..len as usize], color);
            }
            Action::MoveCursor { row, col } => {
                self.r = row.min(self.rows.saturating_sub(1));
                self.c = col.min(self.cols.saturating_sub(1));
                self.backend.move_cursor(self.r, self.c);
            }
            Action::ScrollUp { n } => self.scroll_up(n),
            Action::ScrollDown { n } => self.scroll_down(n),
            Action::NonBufScrollUp { n } => self.non_buf_scroll_up(n),
            Action::NonBufScrollDown { n } => self.non_buf_scroll_down(n),
            Action::SetColor { color } => self.current_color = color,
            Action::SetColOffset { off } => self.col_offset = off,
            Action::PauseOutput => self.pause_output(),
            Action::ResumeOutput => self.resume_output(),
        }
    }
}

fn with_terminal<R>(f: impl FnOnce(&mut Terminal) -> R) -> Option<R> {
    if !TERMINAL_READY.load(Ordering::Acquire) {
        return None;
    }
    // SAFETY: TERMINAL_READY is only ever stored `true` after `init` has
    // fully constructed the `Terminal` in place, and all mutation from here
    // on happens only inside the single active drainer (see module docs).
    let term = unsafe { (*TERMINAL.0.get()).assume_init_mut() };
    Some(f(term))
}

fn enqueue_and_maybe_drain(action: Action) {
    match QUEUE.enqueue(action) {
        Ok(true) => drain(),
        Ok(false) => {}
        Err(e) => log::warn!("terminal: {}", e),
    }
}

fn drain() {
    while let Some(action) = QUEUE.dequeue() {
        with_terminal(|t| t.dispatch(action));
    }
}

fn failsafe_parts() -> (usize, usize, usize, usize, Option<TabMap>, Scrollback) {
    let rows = FAILSAFE_ROWS;
    let cols = FAILSAFE_COLS;
    // SAFETY: `init` runs once, before any other code can reach
    // `FAILSAFE_CELLS`, and this path is only taken when dynamic
    // allocation is unavailable (panic-time init or OOM), so there is no
    // concurrent access to race against.
    let cells = unsafe { &mut *core::ptr::addr_of_mut!(FAILSAFE_CELLS) };
    let scrollback = Scrollback::from_static(cells.as_mut_slice(), rows, cols);
    (rows, cols, 0, rows, None, scrollback)
}

/// Initialize the terminal. Must be called with interrupts disabled,
/// exactly once, before any other terminal operation.
pub fn init(backend: Box<dyn VideoBackend>, config: TerminalConfig) {
    let (rows, cols, extra_rows, _total_rows, tabmap, scrollback) = if !crate::panic::in_panic() {
        let extra_rows = 9 * config.rows;
        let total_rows = config.rows + extra_rows;
        let blank = Cell::blank(config.default_color);
        match Scrollback::new(total_rows, config.cols, blank) {
            Some(sb) => {
                let tabmap = TabMap::new(config.rows, config.cols);
                if tabmap.is_none() {
                    log::warn!("terminal: tab map allocation failed, backspace will retract single cells");
                }
                (config.rows, config.cols, extra_rows, total_rows, tabmap, sb)
            }
            None => {
                log::warn!("terminal: scrollback allocation failed, falling back to the static 80x25 buffer");
                failsafe_parts()
            }
        }
    } else {
        failsafe_parts()
    };

    let mut terminal = Terminal {
        backend,
        saved_backend: None,
        scrollback,
        tabmap,
        filter: None,
        rows,
        cols,
        r: 0,
        c: 0,
        col_offset: 0,
        tab_size: config.tab_size,
        current_color: config.default_color,
        extra_rows,
        max_scroll: 0,
        scroll: 0,
        use_serial: config.use_serial,
    };

    terminal.backend.enable_cursor();
    terminal.backend.move_cursor(0, 0);
    let blank = Cell::blank(config.default_color);
    for row in 0..terminal.rows {
        terminal.scrollback.clear_row_at(0, row, blank);
        terminal.backend.clear_row(row, blank);
    }

    // SAFETY: this runs exactly once, before `TERMINAL_READY` is ever
    // observed `true`, so no other context can be reading `TERMINAL`
    // concurrently.
    unsafe {
        (*TERMINAL.0.get()).write(terminal);
    }
    TERMINAL_READY.store(true, Ordering::Release);

    crate::printk::flush_into_terminal();
}

pub fn is_initialized() -> bool {
    TERMINAL_READY.load(Ordering::Acquire)
}

pub fn write(buf: &[u8]) {
    let color = with_terminal(|t| t.current_color).unwrap_or_default();
    write_colored(buf, color);
}

pub fn write_colored(buf: &[u8], color: ColorCode) {
    const MAX_LEN: usize = 1 << 20;
    let buf = if buf.len() > MAX_LEN { &buf[..MAX_LEN] } else { buf };
    for chunk in buf.chunks(queue::WRITE_CHUNK_CAP) {
        enqueue_and_maybe_drain(Action::write_chunk(chunk, color));
    }
}

pub fn move_cursor(row: usize, col: usize) {
    enqueue_and_maybe_drain(Action::MoveCursor { row, col });
}

pub fn scroll_up(n: usize) {
    enqueue_and_maybe_drain(Action::ScrollUp { n });
}

pub fn scroll_down(n: usize) {
    enqueue_and_maybe_drain(Action::ScrollDown { n });
}

/// Physically shift the viewport's content up by `n` rows, independent of
/// `scroll`/`max_scroll`. See `Terminal::non_buf_scroll_up`.
pub fn non_buf_scroll_up(n: usize) {
    enqueue_and_maybe_drain(Action::NonBufScrollUp { n });
}

/// Physically shift the viewport's content down by `n` rows, independent of
/// `scroll`/`max_scroll`. See `Terminal::non_buf_scroll_down`.
pub fn non_buf_scroll_down(n: usize) {
    enqueue_and_maybe_drain(Action::NonBufScrollDown { n });
}

pub fn set_color(color: ColorCode) {
    enqueue_and_maybe_drain(Action::SetColor { color });
}

pub fn set_column_offset(off: usize) {
    enqueue_and_maybe_drain(Action::SetColOffset { off });
}

/// Install or remove the per-byte filter. Not modeled as a queued action
/// (unlike the rest of the public operations): it changes a single field
/// read back-to-back by the very next write and is only ever called during
/// setup, not from a hot or re-entrant path.
pub fn set_filter(filter: Option<Filter>) {
    with_terminal(|t| t.filter = filter);
}

pub fn pause_output() {
    enqueue_and_maybe_drain(Action::PauseOutput);
}

pub fn resume_output() {
    enqueue_and_maybe_drain(Action::ResumeOutput);
}

pub fn erase_in_line(mode: u8) {
    with_terminal(|t| t.erase_in_line(mode));
}

pub fn erase_in_display(mode: u8) {
    with_terminal(|t| t.erase_in_display(mode));
}

pub fn rows() -> usize {
    with_terminal(|t| t.rows).unwrap_or(0)
}

pub fn cols() -> usize {
    with_terminal(|t| t.cols).unwrap_or(0)
}

pub fn current_row() -> usize {
    with_terminal(|t| t.r).unwrap_or(0)
}

pub fn current_col() -> usize {
    with_terminal(|t| t.c).unwrap_or(0)
}

pub fn tab_size() -> usize {
    with_terminal(|t| t.tab_size).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Records every backend call instead of touching hardware, standing in
    /// for the VGA/framebuffer backends in host-run tests.
    #[derive(Default)]
    struct RecordingBackend {
        rows: Vec<Vec<Cell>>,
        cursor: (usize, usize),
        cursor_enabled: bool,
    }

    impl RecordingBackend {
        fn new(rows: usize, cols: usize) -> Self {
            Self {
                rows: alloc::vec![alloc::vec![Cell::default(); cols]; rows],
                cursor: (0, 0),
                cursor_enabled: false,
            }
        }
    }

    impl VideoBackend for RecordingBackend {
        fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
            self.rows[row][col] = cell;
        }
        fn set_row(&mut self, row: usize, cells: &[Cell], _flush: bool) {
            self.rows[row].copy_from_slice(cells);
        }
        fn clear_row(&mut self, row: usize, blank: Cell) {
            for c in self.rows[row].iter_mut() {
                *c = blank;
            }
        }
        fn move_cursor(&mut self, row: usize, col: usize) {
            self.cursor = (row, col);
        }
        fn enable_cursor(&mut self) {
            self.cursor_enabled = true;
        }
        fn disable_cursor(&mut self) {
            self.cursor_enabled = false;
        }
    }

    /// Build a small terminal directly (bypassing the global singleton and
    /// action queue) so each test gets an isolated instance. The queue's
    /// own enqueue/drain contract is tested separately in `queue::tests`.
    fn small_terminal(rows: usize, cols: usize) -> Terminal {
        let color = ColorCode::default();
        let blank = Cell::blank(color);
        let extra_rows = 9 * rows;
        let scrollback = Scrollback::new(rows + extra_rows, cols, blank).unwrap();
        let tabmap = TabMap::new(rows, cols);
        Terminal {
            backend: alloc::boxed::Box::new(RecordingBackend::new(rows, cols)),
            saved_backend: None,
            scrollback,
            tabmap,
            filter: None,
            rows,
            cols,
            r: 0,
            c: 0,
            col_offset: 0,
            tab_size: 8,
            current_color: color,
            extra_rows,
            max_scroll: 0,
            scroll: 0,
            use_serial: false,
        }
    }

    fn row_text(t: &Terminal, row: usize) -> alloc::string::String {
        let phys = t.scrollback.physical_row(t.scroll, row);
        t.scrollback
            .row(phys)
            .iter()
            .map(|c| c.ch() as char)
            .collect()
    }

    #[test]
    fn abc_newline_lands_cursor_next_row() {
        let mut t = small_terminal(3, 10);
        t.process_write_batch(b"abc\n", t.current_color);
        assert_eq!(&row_text(&t, 0)[..3], "abc");
        assert_eq!((t.r, t.c), (1, 0));
        assert_eq!(t.max_scroll, 0);
    }

    #[test]
    fn writing_full_row_wraps_on_next_write() {
        let mut t = small_terminal(3, 10);
        t.process_write_batch(b"abcdefghij", t.current_color);
        assert_eq!(row_text(&t, 0), "abcdefghij");
        assert_eq!((t.r, t.c), (0, 10));
        t.process_write_batch(b"X", t.current_color);
        assert_eq!(t.r, 1);
        assert_eq!(row_text(&t, 1).chars().next().unwrap(), 'X');
    }

    #[test]
    fn tab_marks_trailing_cell_and_jumps_cursor() {
        let mut t = small_terminal(1, 10);
        t.process_write_batch(b"ab\tc", t.current_color);
        assert_eq!(t.scrollback.get_cell(t.scroll, 0, 0).ch(), b'a');
        assert_eq!(t.scrollback.get_cell(t.scroll, 0, 1).ch(), b'b');
        assert!(t.tabmap.as_ref().unwrap().get(0, 8));
        assert_eq!(t.scrollback.get_cell(t.scroll, 0, 9).ch(), b'c');
        assert_eq!(t.c, 10);
    }

    #[test]
    fn backspace_walks_back_through_tab_region() {
        let mut t = small_terminal(1, 10);
        t.process_write_batch(b"ab\tc", t.current_color);
        t.process_write_batch(b"\x08\x08\x08\x08", t.current_color);
        assert_eq!(t.c, 2);
    }

    #[test]
    fn scroll_up_then_down_returns_to_bottom() {
        let mut t = small_terminal(3, 10);
        for row in 0..30 {
            let byte = b'0' + (row % 10) as u8;
            t.process_write_batch(&[byte, b'\n'], t.current_color);
        }
        assert_eq!(t.max_scroll, 27);
        t.scroll_up(5);
        assert_eq!(t.scroll, 22);
        t.scroll_down(100);
        assert_eq!(t.scroll, t.max_scroll);
    }

    #[test]
    fn set_scroll_is_idempotent() {
        let mut t = small_terminal(3, 10);
        t.process_write_batch(b"\n\n\n\n\n", t.current_color);
        let before = t.scroll;
        t.set_scroll(before);
        assert_eq!(t.scroll, before);
    }

    #[test]
    fn filter_rewrites_byte() {
        fn replace_x(
            ch: &mut u8,
            _color: &mut ColorCode,
            _inner: filter::InnerWrite<'_>,
            _ctx: *mut (),
        ) -> FilterAction {
            if *ch == b'X' {
                *ch = b'Y';
            }
            FilterAction::WriteC
        }
        let mut t = small_terminal(1, 10);
        t.filter = Some(Filter {
            func: replace_x,
            ctx: core::ptr::null_mut(),
        });
        t.process_write_batch(b"aXb", t.current_color);
        assert_eq!(&row_text(&t, 0)[..3], "aYb");
    }

    #[test]
    fn backspace_at_column_offset_is_noop() {
        let mut t = small_terminal(1, 10);
        t.process_write_batch(b"ab", t.current_color);
        t.col_offset = 2;
        t.write_backspace(t.current_color);
        assert_eq!(t.c, 2);
    }

    #[test]
    fn erase_in_display_mode_3_resets_scrollback() {
        let mut t = small_terminal(3, 10);
        for _ in 0..10 {
            t.process_write_batch(b"x\n", t.current_color);
        }
        assert!(t.max_scroll > 0);
        t.erase_in_display(3);
        assert_eq!(t.scroll, 0);
        assert_eq!(t.max_scroll, 0);
    }

    #[test]
    fn pause_and_resume_swap_backend() {
        let mut t = small_terminal(2, 4);
        t.pause_output();
        assert!(t.saved_backend.is_some());
        t.process_write_batch(b"x", t.current_color);
        t.resume_output();
        assert!(t.saved_backend.is_none());
    }

    #[test]
    fn move_cursor_clamps_col_inside_grid() {
        let mut t = small_terminal(3, 10);
        t.dispatch(Action::MoveCursor { row: 1, col: 10 });
        assert_eq!((t.r, t.c), (1, 9));
        t.dispatch(Action::MoveCursor { row: 99, col: 3 });
        assert_eq!((t.r, t.c), (2, 3));
    }

    #[test]
    fn non_buf_scroll_up_shifts_viewport_content_in_place() {
        let mut t = small_terminal(3, 4);
        t.process_write_batch(b"a\nb\nc", t.current_color);
        let scroll_before = t.scroll;
        t.non_buf_scroll_up(1);
        assert_eq!(t.scroll, scroll_before);
        assert_eq!(row_text(&t, 0).chars().next().unwrap(), 'b');
        assert_eq!(row_text(&t, 1).chars().next().unwrap(), 'c');
        assert_eq!(row_text(&t, 2).chars().next().unwrap(), ' ');
    }

    #[test]
    fn non_buf_scroll_down_shifts_viewport_content_in_place() {
        let mut t = small_terminal(3, 4);
        t.process_write_batch(b"a\nb\nc", t.current_color);
        t.non_buf_scroll_down(1);
        assert_eq!(row_text(&t, 0).chars().next().unwrap(), ' ');
        assert_eq!(row_text(&t, 1).chars().next().unwrap(), 'a');
        assert_eq!(row_text(&t, 2).chars().next().unwrap(), 'b');
    }
}
