//! Message slot driver: lifecycle and device operations
//!
//! `open` ensures the minor's registry exists, the select-channel ioctl binds
//! the handle, and `read`/`write` operate on the bound channel only.

use alloc::sync::Arc;

use crate::config::{SlotConfig, BUFFER_LEN, MSG_SLOT_CHANNEL};
use crate::device::conf::{CharDevTable, Registration};
use crate::device::FileOperations;
use crate::error::{Result, SlotError};
use crate::kern::copyio::{copyin, copyout, UserSliceReader, UserSliceWriter};
use crate::slot::channel::ChannelId;
use crate::slot::file::SlotFile;
use crate::slot::table::{DeviceTable, SharedRegistry, TeardownReport};

/// A loaded message slot driver.
///
/// Owns the device instance table for its whole lifetime; [`MessageSlot::exit`]
/// is the only place channels are destroyed.
#[derive(Debug)]
pub struct MessageSlot {
    config: SlotConfig,
    devices: DeviceTable,
    registration: Registration,
}

impl MessageSlot {
    /// Allocate the device table and register the character device
    pub fn init(config: SlotConfig, chrdevs: &Arc<CharDevTable>) -> Result<Self> {
        let devices = DeviceTable::new(config.minor_count, config.max_channels)?;

        let registration = match Registration::register(chrdevs, config.major, config.name) {
            Ok(reg) => reg,
            Err(err) => {
                log::error!("{} registration failed for {}", config.name, config.major);
                return Err(err);
            }
        };

        log::info!("register {}, major number - {}", config.name, config.major);
        Ok(Self {
            config,
            devices,
            registration,
        })
    }

    /// Release every channel and registry, then unregister the device
    pub fn exit(self) -> TeardownReport {
        log::info!("unregister {}", self.config.name);
        let report = self.devices.release_all();
        drop(self.registration);
        log::info!(
            "unregister complete: {} devices, {} channels released",
            report.registries,
            report.channels
        );
        report
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    pub fn major(&self) -> u32 {
        self.registration.major()
    }

    /// Has `minor` been opened since load?
    pub fn is_instantiated(&self, minor: u32) -> bool {
        self.devices.get(minor).is_some()
    }

    /// Channels currently held by `minor`
    pub fn channel_count(&self, minor: u32) -> usize {
        self.devices
            .get(minor)
            .map_or(0, |registry| registry.lock().len())
    }

    fn registry(&self, minor: u32) -> Result<SharedRegistry> {
        self.devices.get(minor).ok_or(SlotError::InvalidArgument)
    }
}

impl FileOperations for MessageSlot {
    type Data = SlotFile;

    fn open(&self, minor: u32) -> Result<SlotFile> {
        self.devices.instantiate(minor)?;
        log::debug!("minor {}: opened", minor);
        Ok(SlotFile::new(minor))
    }

    fn ioctl(&self, file: &mut SlotFile, cmd: u32, arg: u64) -> Result<()> {
        if cmd != MSG_SLOT_CHANNEL {
            log::debug!("minor {}: unknown ioctl {:#x}", file.minor(), cmd);
            return Err(SlotError::InvalidArgument);
        }

        let id = ChannelId::new(arg).ok_or(SlotError::InvalidArgument)?;
        file.bind(id);
        log::debug!("minor {}: bound to channel {}", file.minor(), id);
        Ok(())
    }

    fn read(&self, file: &SlotFile, writer: &mut UserSliceWriter<'_>) -> Result<usize> {
        if writer.is_null() {
            return Err(SlotError::InvalidArgument);
        }
        let id = file.bound()?;
        let registry = self.registry(file.minor())?;

        let mut staging = [0u8; BUFFER_LEN];
        let len = {
            let mut registry = registry.lock();
            let channel = registry.find_or_create(id)?;
            if channel.is_empty() {
                return Err(SlotError::WouldBlock);
            }
            if channel.len() > writer.len() {
                return Err(SlotError::NoSpace {
                    needed: channel.len(),
                    capacity: writer.len(),
                });
            }
            staging[..channel.len()].copy_from_slice(channel.message());
            channel.len()
        };

        copyout(&staging[..len], writer).map_err(SlotError::CopyOut)?;
        log::debug!("minor {}: read {} bytes from channel {}", file.minor(), len, id);
        Ok(len)
    }

    fn write(&self, file: &SlotFile, reader: &UserSliceReader<'_>) -> Result<usize> {
        if reader.is_null() {
            return Err(SlotError::InvalidArgument);
        }
        let id = file.bound()?;

        let len = reader.len();
        if len == 0 || len > BUFFER_LEN {
            return Err(SlotError::MessageSize(len));
        }
        let registry = self.registry(file.minor())?;

        // Stage the whole message before the channel is touched
        let mut staging = [0u8; BUFFER_LEN];
        copyin(reader, &mut staging[..len]).map_err(SlotError::CopyIn)?;

        let written = registry.lock().find_or_create(id)?.store(&staging[..len])?;
        log::debug!("minor {}: wrote {} bytes to channel {}", file.minor(), written, id);
        Ok(written)
    }

    fn release(&self, file: &mut SlotFile) {
        log::debug!("minor {}: released", file.minor());
    }
}
