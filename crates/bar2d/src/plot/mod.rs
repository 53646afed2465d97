//! Plot host: view state plus the ordered list of registered layers.
//!
//! The host draws objects in registration order and allocates pick ids by
//! chaining offsets: each object's `draw_pick` receives the offset returned
//! by the previous one, so objects sharing one pick target get disjoint ranges.

use std::any::Any;

use crate::bars::PickResult;
use crate::coords::Bounds;
use crate::error::Result;
use crate::gpu::GpuBackend;

/// Host-supplied view state read by layers at draw time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlotView {
    /// Plot area on screen, in logical pixels.
    ///
    /// Host bookkeeping only: bar layers map into `data_box` clip space and
    /// never read it.
    pub view_box: Bounds,
    /// Visible data-space rectangle.
    pub data_box: Bounds,
    /// Device pixels per logical pixel for the color pass.
    pub pixel_ratio: f32,
    /// Device pixels per logical pixel for the pick pass.
    pub pick_pixel_ratio: f32,
}

impl Default for PlotView {
    fn default() -> Self {
        Self {
            view_box: Bounds::new(0.0, 0.0, 1.0, 1.0),
            data_box: Bounds::new(0.0, 0.0, 1.0, 1.0),
            pixel_ratio: 1.0,
            pick_pixel_ratio: 1.0,
        }
    }
}

/// Handle returned by [`Plot::add_object`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Something a [`Plot`] can draw, pick and dispose.
pub trait PlotObject<B: GpuBackend>: Any {
    fn draw(&self, view: &PlotView, gpu: &mut B) -> Result<()>;

    /// Draws ids starting at `pick_offset`; returns the next free offset.
    fn draw_pick(&mut self, view: &PlotView, gpu: &mut B, pick_offset: u32) -> Result<u32>;

    /// Resolves a decoded pick value, or `None` if it is not in this object's range.
    fn pick(&self, x: f64, y: f64, value: u32) -> Option<PickResult>;

    /// Releases every GPU resource held by the object.
    fn dispose(self: Box<Self>, gpu: &mut B);

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A pick hit together with the object that produced it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlotPick {
    pub object: ObjectId,
    pub result: PickResult,
}

/// Owner of registered objects.
pub struct Plot<B: GpuBackend> {
    view: PlotView,
    objects: Vec<(ObjectId, Box<dyn PlotObject<B>>)>,
    next_id: u64,
}

impl<B: GpuBackend + 'static> Plot<B> {
    pub fn new(view: PlotView) -> Self {
        Self { view, objects: Vec::new(), next_id: 0 }
    }

    #[inline]
    pub fn view(&self) -> &PlotView {
        &self.view
    }

    #[inline]
    pub fn view_mut(&mut self) -> &mut PlotView {
        &mut self.view
    }

    pub fn set_data_box(&mut self, data_box: Bounds) {
        self.view.data_box = data_box;
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Registered ids in draw order.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.iter().map(|(id, _)| *id)
    }

    /// Registers `object` at the end of the draw order.
    pub fn add_object(&mut self, object: Box<dyn PlotObject<B>>) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push((id, object));
        log::debug!("plot: added object {}", id.0);
        id
    }

    /// Deregisters `id` and hands the object back without disposing it.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<Box<dyn PlotObject<B>>> {
        let index = self.objects.iter().position(|(oid, _)| *oid == id)?;
        log::debug!("plot: removed object {}", id.0);
        Some(self.objects.remove(index).1)
    }

    /// Deregisters and disposes `id`. Returns `false` if it was not registered.
    pub fn dispose_object(&mut self, id: ObjectId, gpu: &mut B) -> bool {
        match self.remove_object(id) {
            Some(object) => {
                object.dispose(gpu);
                true
            }
            None => false,
        }
    }

    pub fn object<T: 'static>(&self, id: ObjectId) -> Option<&T> {
        self.objects
            .iter()
            .find(|(oid, _)| *oid == id)
            .and_then(|(_, o)| o.as_any().downcast_ref::<T>())
    }

    pub fn object_mut<T: 'static>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.objects
            .iter_mut()
            .find(|(oid, _)| *oid == id)
            .and_then(|(_, o)| o.as_any_mut().downcast_mut::<T>())
    }

    /// Color pass over every object in registration order.
    pub fn draw(&self, gpu: &mut B) -> Result<()> {
        for (_, object) in &self.objects {
            object.draw(&self.view, gpu)?;
        }
        Ok(())
    }

    /// Pick pass over every object, chaining offsets from `0`.
    ///
    /// Returns the total number of ids handed out.
    pub fn draw_pick(&mut self, gpu: &mut B) -> Result<u32> {
        let view = self.view;
        let mut offset = 0;
        for (_, object) in &mut self.objects {
            offset = object.draw_pick(&view, gpu, offset)?;
        }
        Ok(offset)
    }

    /// Resolves a decoded pick value against the objects' last pick ranges.
    pub fn pick(&self, x: f64, y: f64, value: u32) -> Option<PlotPick> {
        self.objects.iter().find_map(|(id, object)| {
            object.pick(x, y, value).map(|result| PlotPick { object: *id, result })
        })
    }

    /// Disposes every object.
    pub fn dispose(self, gpu: &mut B) {
        for (_, object) in self.objects {
            object.dispose(gpu);
        }
    }
}
