// Purpose - getting digitized waveforms out to the AWG

pub mod export;
