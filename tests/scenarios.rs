//! End-to-end message slot behaviour through open files

use std::sync::Arc;

use message_slot::libc::errno::{EINVAL, EMSGSIZE, ENOMEM, ENOSPC, ENXIO, EWOULDBLOCK};
use message_slot::{
    CharDevTable, MessageSlot, OpenFile, SlotConfig, SlotError, UserSliceWriter, BUFFER_LEN,
    MSG_SLOT_CHANNEL,
};

fn load(config: SlotConfig) -> MessageSlot {
    MessageSlot::init(config, &Arc::new(CharDevTable::new())).expect("driver init")
}

fn bound<'a>(slot: &'a MessageSlot, minor: u32, channel: u64) -> OpenFile<'a, MessageSlot> {
    let mut file = OpenFile::open(slot, minor).expect("open");
    file.ioctl(MSG_SLOT_CHANNEL, channel).expect("select channel");
    file
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn write_read_then_reselect_unwritten_channel() {
    let slot = load(SlotConfig::default());
    let mut file = bound(&slot, 0, 42);

    assert_eq!(file.write(b"abc"), Ok(3));
    let mut buf = [0u8; 10];
    assert_eq!(file.read(&mut buf), Ok(3));
    assert_eq!(&buf[..3], b"abc");

    file.ioctl(MSG_SLOT_CHANNEL, 99).unwrap();
    let err = file.read(&mut buf).unwrap_err();
    assert_eq!(err, SlotError::WouldBlock);
    assert_eq!(err.to_errno(), EWOULDBLOCK);
}

#[test]
fn second_write_fully_overwrites() {
    let slot = load(SlotConfig::default());
    let file = bound(&slot, 0, 1);

    file.write(b"xyz").unwrap();
    file.write(b"ab").unwrap();

    let mut buf = [0u8; 8];
    assert_eq!(file.read(&mut buf), Ok(2));
    assert_eq!(&buf[..2], b"ab");
}

// ============================================================================
// Channel visibility
// ============================================================================

#[test]
fn read_is_idempotent() {
    let slot = load(SlotConfig::default());
    let file = bound(&slot, 0, 3);
    file.write(b"again").unwrap();

    for _ in 0..5 {
        let mut buf = [0u8; BUFFER_LEN];
        assert_eq!(file.read(&mut buf), Ok(5));
        assert_eq!(&buf[..5], b"again");
    }
}

#[test]
fn channels_are_isolated() {
    let slot = load(SlotConfig::default());
    let a = bound(&slot, 0, 5);
    let b = bound(&slot, 0, 7);

    a.write(b"from a").unwrap();
    let mut buf = [0u8; 16];
    assert_eq!(b.read(&mut buf), Err(SlotError::WouldBlock));

    b.write(b"from b").unwrap();
    assert_eq!(a.read(&mut buf), Ok(6));
    assert_eq!(&buf[..6], b"from a");
}

#[test]
fn handles_on_same_channel_share_messages() {
    let slot = load(SlotConfig::default());
    let a = bound(&slot, 0, 11);
    let b = bound(&slot, 0, 11);

    a.write(b"hello").unwrap();
    let mut buf = [0u8; 16];
    assert_eq!(b.read(&mut buf), Ok(5));
    assert_eq!(&buf[..5], b"hello");
}

#[test]
fn minors_are_isolated() {
    let slot = load(SlotConfig::default());
    let on_zero = bound(&slot, 0, 1);
    let on_one = bound(&slot, 1, 1);

    on_zero.write(b"minor zero").unwrap();
    let mut buf = [0u8; 16];
    assert_eq!(on_one.read(&mut buf), Err(SlotError::WouldBlock));
}

#[test]
fn message_survives_close_and_reopen() {
    let slot = load(SlotConfig::default());
    bound(&slot, 4, 8).write(b"persist").unwrap();

    let file = bound(&slot, 4, 8);
    let mut buf = [0u8; 16];
    assert_eq!(file.read(&mut buf), Ok(7));
    assert_eq!(&buf[..7], b"persist");
}

#[test]
fn reopened_handle_starts_unbound() {
    let slot = load(SlotConfig::default());
    drop(bound(&slot, 0, 8));

    let file = OpenFile::open(&slot, 0).unwrap();
    assert_eq!(file.write(b"x").map_err(|e| e.to_errno()), Err(EINVAL));
}

// ============================================================================
// Size and capacity errors
// ============================================================================

#[test]
fn out_of_range_writes_keep_previous_message() {
    let slot = load(SlotConfig::default());
    let file = bound(&slot, 0, 1);
    file.write(b"keep").unwrap();

    assert_eq!(file.write(b""), Err(SlotError::MessageSize(0)));
    let big = vec![b'x'; BUFFER_LEN + 1];
    let err = file.write(&big).unwrap_err();
    assert_eq!(err.to_errno(), EMSGSIZE);

    let mut buf = [0u8; 8];
    assert_eq!(file.read(&mut buf), Ok(4));
    assert_eq!(&buf[..4], b"keep");
}

#[test]
fn max_length_message_round_trips() {
    let slot = load(SlotConfig::default());
    let file = bound(&slot, 0, 1);
    let msg: Vec<u8> = (0..BUFFER_LEN as u8).collect();

    assert_eq!(file.write(&msg), Ok(BUFFER_LEN));
    let mut buf = [0u8; BUFFER_LEN];
    assert_eq!(file.read(&mut buf), Ok(BUFFER_LEN));
    assert_eq!(&buf[..], &msg[..]);
}

#[test]
fn short_destination_is_no_space_and_not_truncated() {
    let slot = load(SlotConfig::default());
    let file = bound(&slot, 0, 1);
    file.write(b"twelve bytes").unwrap();

    let mut small = [0u8; 4];
    let err = file.read(&mut small).unwrap_err();
    assert_eq!(err, SlotError::NoSpace { needed: 12, capacity: 4 });
    assert_eq!(err.to_errno(), ENOSPC);
    assert_eq!(small, [0u8; 4]);

    let mut buf = [0u8; 12];
    assert_eq!(file.read(&mut buf), Ok(12));
}

#[test]
fn copyout_fault_reports_and_keeps_message() {
    let slot = load(SlotConfig::default());
    let file = bound(&slot, 0, 1);
    file.write(b"fault").unwrap();

    let mut buf = [0u8; 8];
    let mut writer = UserSliceWriter::with_fault(&mut buf, 2);
    assert!(matches!(file.read_from(&mut writer), Err(SlotError::CopyOut(_))));

    let mut buf = [0u8; 8];
    assert_eq!(file.read(&mut buf), Ok(5));
}

// ============================================================================
// Device table and quota
// ============================================================================

#[test]
fn open_outside_table_is_no_device() {
    let slot = load(SlotConfig::default().with_minor_count(2));
    let err = OpenFile::open(&slot, 2).unwrap_err();
    assert_eq!(err, SlotError::NoDevice(2));
    assert_eq!(err.to_errno(), ENXIO);
    assert!(OpenFile::open(&slot, 1).is_ok());
}

#[test]
fn highest_default_minor_is_usable() {
    let slot = load(SlotConfig::default());
    let file = bound(&slot, 256, 1);
    assert_eq!(file.write(b"top"), Ok(3));
}

#[test]
fn default_config_has_no_channel_limit() {
    let slot = load(SlotConfig::default());
    let mut file = OpenFile::open(&slot, 0).unwrap();
    for channel in 1..=300u64 {
        file.ioctl(MSG_SLOT_CHANNEL, channel).unwrap();
        assert_eq!(file.write(b"m"), Ok(1), "write to channel {channel}");
    }
    assert_eq!(slot.channel_count(0), 300);

    file.ioctl(MSG_SLOT_CHANNEL, 257).unwrap();
    let mut buf = [0u8; 4];
    assert_eq!(file.read(&mut buf), Ok(1));
}

#[test]
fn channel_quota_exhaustion_is_no_memory() {
    let slot = load(SlotConfig::default().with_max_channels(2));
    bound(&slot, 0, 1).write(b"1").unwrap();
    bound(&slot, 0, 2).write(b"2").unwrap();

    let third = bound(&slot, 0, 3);
    let err = third.write(b"3").unwrap_err();
    assert_eq!(err.to_errno(), ENOMEM);
    assert_eq!(slot.channel_count(0), 2);

    // other minors have their own quota
    assert_eq!(bound(&slot, 1, 3).write(b"3"), Ok(1));
}

#[test]
fn read_creates_channel() {
    let slot = load(SlotConfig::default());
    let file = bound(&slot, 0, 77);
    let mut buf = [0u8; 4];
    assert_eq!(file.read(&mut buf), Err(SlotError::WouldBlock));
    assert_eq!(slot.channel_count(0), 1);
}

#[test]
fn teardown_releases_everything() {
    let chrdevs = Arc::new(CharDevTable::new());
    let slot = MessageSlot::init(SlotConfig::default(), &chrdevs).unwrap();
    for minor in 0..3 {
        for channel in 1..=4 {
            bound(&slot, minor, channel).write(b"m").unwrap();
        }
    }
    OpenFile::open(&slot, 9).unwrap();

    let report = slot.exit();
    assert_eq!(report.registries, 4);
    assert_eq!(report.channels, 12);
    assert!(chrdevs.list().is_empty());

    // the major can be claimed again after unload
    assert!(MessageSlot::init(SlotConfig::default(), &chrdevs).is_ok());
}
