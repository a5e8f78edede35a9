mod playback;
mod propagation;
mod scenario;
